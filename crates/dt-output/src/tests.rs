//! Integration tests for dt-output.

#[cfg(test)]
mod csv_tests {
    use tempfile::TempDir;

    use crate::csv::CsvWriter;
    use crate::row::{ConnectionRow, ProbeRow, TrafficWayRow};
    use crate::writer::OutputWriter;

    fn tmp() -> TempDir {
        tempfile::tempdir().expect("create temp dir")
    }

    fn probe_row(index: u32) -> ProbeRow {
        ProbeRow { index, x: index as f64 * 10.0, y: index as f64 * 20.0, z: 0.0, pop200: 4.0, pop1000: 90.0 }
    }

    fn way_row(id: &str) -> TrafficWayRow {
        TrafficWayRow { id: id.to_string(), src_probe_index: 0, dst_probe_index: 1, lane_count: 2, flow_percentile: 0.5 }
    }

    fn conn_row(probe_index: u32) -> ConnectionRow {
        ConnectionRow {
            probe_index,
            inbound_traffic_way_id: "0_1".to_string(),
            inbound_lane_number: 0,
            outbound_traffic_way_id: "1_2".to_string(),
        }
    }

    #[test]
    fn csv_files_created() {
        let dir = tmp();
        let _w = CsvWriter::new(dir.path()).unwrap();
        assert!(dir.path().join("probes.csv").exists());
        assert!(dir.path().join("traffic_ways.csv").exists());
        assert!(dir.path().join("connections.csv").exists());
    }

    #[test]
    fn csv_headers_correct() {
        let dir = tmp();
        let mut w = CsvWriter::new(dir.path()).unwrap();
        w.finish().unwrap();

        let mut rdr = csv::Reader::from_path(dir.path().join("probes.csv")).unwrap();
        let headers: Vec<_> = rdr.headers().unwrap().iter().map(str::to_owned).collect();
        assert_eq!(headers, ["index", "x", "y", "z", "pop200", "pop1000"]);

        let mut rdr2 = csv::Reader::from_path(dir.path().join("traffic_ways.csv")).unwrap();
        let headers2: Vec<_> = rdr2.headers().unwrap().iter().map(str::to_owned).collect();
        assert_eq!(headers2, ["id", "src_probe_index", "dst_probe_index", "lane_count", "flow_percentile"]);

        let mut rdr3 = csv::Reader::from_path(dir.path().join("connections.csv")).unwrap();
        let headers3: Vec<_> = rdr3.headers().unwrap().iter().map(str::to_owned).collect();
        assert_eq!(headers3, ["probe_index", "inbound_traffic_way_id", "inbound_lane_number", "outbound_traffic_way_id"]);
    }

    #[test]
    fn csv_probe_round_trip() {
        let dir = tmp();
        let mut w = CsvWriter::new(dir.path()).unwrap();
        let rows = vec![probe_row(0), probe_row(1), probe_row(2)];
        w.write_probes(&rows).unwrap();
        w.finish().unwrap();

        let mut rdr = csv::Reader::from_path(dir.path().join("probes.csv")).unwrap();
        let read_rows: Vec<_> = rdr.records().map(|r| r.unwrap()).collect();
        assert_eq!(read_rows.len(), 3);
        assert_eq!(&read_rows[1][0], "1"); // index
        assert_eq!(&read_rows[1][1], "10"); // x
    }

    #[test]
    fn csv_traffic_way_round_trip() {
        let dir = tmp();
        let mut w = CsvWriter::new(dir.path()).unwrap();
        w.write_traffic_ways(&[way_row("0_1")]).unwrap();
        w.finish().unwrap();

        let mut rdr = csv::Reader::from_path(dir.path().join("traffic_ways.csv")).unwrap();
        let read_rows: Vec<_> = rdr.records().map(|r| r.unwrap()).collect();
        assert_eq!(read_rows.len(), 1);
        assert_eq!(&read_rows[0][0], "0_1");
        assert_eq!(&read_rows[0][3], "2"); // lane_count
    }

    #[test]
    fn csv_connection_round_trip() {
        let dir = tmp();
        let mut w = CsvWriter::new(dir.path()).unwrap();
        w.write_connections(&[conn_row(3)]).unwrap();
        w.finish().unwrap();

        let mut rdr = csv::Reader::from_path(dir.path().join("connections.csv")).unwrap();
        let read_rows: Vec<_> = rdr.records().map(|r| r.unwrap()).collect();
        assert_eq!(read_rows.len(), 1);
        assert_eq!(&read_rows[0][0], "3");
        assert_eq!(&read_rows[0][1], "0_1");
    }

    #[test]
    fn csv_finish_idempotent() {
        let dir = tmp();
        let mut w = CsvWriter::new(dir.path()).unwrap();
        w.finish().unwrap();
        w.finish().unwrap(); // second call should not panic
    }

    #[test]
    fn csv_empty_batch_ok() {
        let dir = tmp();
        let mut w = CsvWriter::new(dir.path()).unwrap();
        w.write_probes(&[]).unwrap();
        w.write_traffic_ways(&[]).unwrap();
        w.write_connections(&[]).unwrap();
    }
}

// ── SQLite tests ──────────────────────────────────────────────────────────────

#[cfg(all(test, feature = "sqlite"))]
mod sqlite_tests {
    use tempfile::TempDir;

    use crate::row::{ProbeRow, TrafficWayRow};
    use crate::sqlite::SqliteWriter;
    use crate::writer::OutputWriter;

    fn tmp() -> TempDir {
        tempfile::tempdir().expect("create temp dir")
    }

    #[test]
    fn sqlite_db_created() {
        let dir = tmp();
        let _w = SqliteWriter::new(dir.path()).unwrap();
        assert!(dir.path().join("output.db").exists());
    }

    #[test]
    fn sqlite_probe_count() {
        let dir = tmp();
        let mut w = SqliteWriter::new(dir.path()).unwrap();
        let rows = vec![
            ProbeRow { index: 0, x: 0.0, y: 0.0, z: 0.0, pop200: 1.0, pop1000: 2.0 },
            ProbeRow { index: 1, x: 1.0, y: 1.0, z: 0.0, pop200: 3.0, pop1000: 4.0 },
        ];
        w.write_probes(&rows).unwrap();
        w.finish().unwrap();

        let conn = rusqlite::Connection::open(dir.path().join("output.db")).unwrap();
        let count: i64 = conn.query_row("SELECT COUNT(*) FROM probes", [], |r| r.get(0)).unwrap();
        assert_eq!(count, 2);
    }

    #[test]
    fn sqlite_traffic_way_stored() {
        let dir = tmp();
        let mut w = SqliteWriter::new(dir.path()).unwrap();
        w.write_traffic_ways(&[TrafficWayRow {
            id: "0_1".to_string(), src_probe_index: 0, dst_probe_index: 1, lane_count: 3, flow_percentile: 0.9,
        }]).unwrap();
        w.finish().unwrap();

        let conn = rusqlite::Connection::open(dir.path().join("output.db")).unwrap();
        let lane_count: i64 = conn.query_row(
            "SELECT lane_count FROM traffic_ways WHERE id = '0_1'", [], |r| r.get(0)
        ).unwrap();
        assert_eq!(lane_count, 3);
    }
}

// ── Parquet tests ─────────────────────────────────────────────────────────────

#[cfg(all(test, feature = "parquet"))]
mod parquet_tests {
    use tempfile::TempDir;

    use parquet::arrow::arrow_reader::ParquetRecordBatchReaderBuilder;

    use crate::parquet::ParquetWriter;
    use crate::row::ProbeRow;
    use crate::writer::OutputWriter;

    fn tmp() -> TempDir {
        tempfile::tempdir().expect("create temp dir")
    }

    #[test]
    fn parquet_files_created() {
        let dir = tmp();
        let mut w = ParquetWriter::new(dir.path()).unwrap();
        w.finish().unwrap();
        assert!(dir.path().join("probes.parquet").exists());
        assert!(dir.path().join("traffic_ways.parquet").exists());
        assert!(dir.path().join("connections.parquet").exists());
    }

    #[test]
    fn parquet_probe_round_trip() {
        let dir = tmp();
        let mut w = ParquetWriter::new(dir.path()).unwrap();
        let rows = vec![
            ProbeRow { index: 0, x: 0.0, y: 0.0, z: 0.0, pop200: 1.0, pop1000: 2.0 },
            ProbeRow { index: 1, x: 5.0, y: 5.0, z: 0.0, pop200: 3.0, pop1000: 4.0 },
        ];
        w.write_probes(&rows).unwrap();
        w.finish().unwrap();

        let file = std::fs::File::open(dir.path().join("probes.parquet")).unwrap();
        let builder = ParquetRecordBatchReaderBuilder::try_new(file).unwrap();
        let schema = builder.schema().clone();
        let reader = builder.build().unwrap();

        let batches: Vec<_> = reader.map(|b| b.unwrap()).collect();
        let total_rows: usize = batches.iter().map(|b| b.num_rows()).sum();
        assert_eq!(total_rows, 2);

        let field_names: Vec<&str> = schema.fields().iter().map(|f| f.name().as_str()).collect();
        assert_eq!(field_names, ["index", "x", "y", "z", "pop200", "pop1000"]);
    }

    #[test]
    fn parquet_finish_required() {
        let dir = tmp();
        {
            let mut w = ParquetWriter::new(dir.path()).unwrap();
            w.write_probes(&[ProbeRow { index: 0, x: 0.0, y: 0.0, z: 0.0, pop200: 1.0, pop1000: 2.0 }]).unwrap();
            // Drop without calling finish() — ArrowWriter's Drop will NOT write the footer.
        }

        let file = std::fs::File::open(dir.path().join("probes.parquet")).unwrap();
        let result = ParquetRecordBatchReaderBuilder::try_new(file);
        assert!(result.is_err(), "file without Parquet footer should fail to open");
    }
}

// ── Observer / row-conversion tests ───────────────────────────────────────────

#[cfg(test)]
mod observer_tests {
    use std::collections::HashMap;

    use dt_core::{LaneCurveIndex, LaneIndex, Point3, PopulationProbe, ProbeConnection, ProbeIndex};
    use dt_curves::CatmulRomCurve3;
    use dt_network::{ArcInterval, Intersection, MarkedCurve, MarkingType, TrafficConnection, TrafficLane, TrafficMarking, TrafficWay};
    use tempfile::TempDir;

    use crate::csv::CsvWriter;
    use crate::observer::GenerationObserver;

    fn tmp() -> TempDir {
        tempfile::tempdir().expect("create temp dir")
    }

    fn straight_curve() -> CatmulRomCurve3 {
        CatmulRomCurve3::new(
            Point3::new(-10.0, 0.0, 0.0),
            Point3::new(0.0, 0.0, 0.0),
            Point3::new(100.0, 0.0, 0.0),
            Point3::new(110.0, 0.0, 0.0),
        )
    }

    fn one_lane_traffic_way(id: &str) -> TrafficWay {
        let curve = straight_curve();
        let marked_curves = vec![
            MarkedCurve {
                curve,
                markings: vec![TrafficMarking { arc_interval: ArcInterval { start: 0.0, stop: 1.0 }, marking_type: MarkingType::SolidYellow }],
            },
            MarkedCurve {
                curve,
                markings: vec![TrafficMarking { arc_interval: ArcInterval { start: 0.0, stop: 1.0 }, marking_type: MarkingType::SolidWhite }],
            },
        ];
        let lanes = vec![TrafficLane {
            left_curve_index: LaneCurveIndex(0),
            right_curve_index: LaneCurveIndex(1),
            left_lane_change_windows: Vec::new(),
            left_adjacent_lane_indices: Vec::new(),
            right_lane_change_windows: Vec::new(),
            right_adjacent_lane_indices: Vec::new(),
        }];
        TrafficWay {
            id: id.to_string(),
            leftmost_curve: curve,
            marked_curves,
            lanes,
            entrance_lane_indices: vec![LaneIndex(0)],
            exit_lane_indices: vec![LaneIndex(0)],
            flow_percentile: 0.42,
        }
    }

    #[test]
    fn probe_rows_carry_index_and_location() {
        let dir = tmp();
        let writer = CsvWriter::new(dir.path()).unwrap();
        let mut obs = GenerationObserver::new(writer);

        let probes = vec![
            PopulationProbe { location: Point3::new(0.0, 0.0, 0.0), pop200: 1.0, pop1000: 2.0 },
            PopulationProbe { location: Point3::new(50.0, 25.0, 0.0), pop200: 3.0, pop1000: 4.0 },
        ];
        obs.on_probes_generated(&probes);
        obs.on_generation_end();
        assert!(obs.take_error().is_none());

        let mut rdr = csv::Reader::from_path(dir.path().join("probes.csv")).unwrap();
        let rows: Vec<_> = rdr.records().map(|r| r.unwrap()).collect();
        assert_eq!(rows.len(), 2);
        assert_eq!(&rows[1][0], "1"); // index
        assert_eq!(&rows[1][1], "50"); // x
    }

    #[test]
    fn traffic_way_rows_sorted_by_connection() {
        let dir = tmp();
        let writer = CsvWriter::new(dir.path()).unwrap();
        let mut obs = GenerationObserver::new(writer);

        let mut traffic_ways: HashMap<ProbeConnection, TrafficWay> = HashMap::new();
        traffic_ways.insert(
            ProbeConnection::new(ProbeIndex(1), ProbeIndex(0)),
            one_lane_traffic_way("1_0"),
        );
        traffic_ways.insert(
            ProbeConnection::new(ProbeIndex(0), ProbeIndex(1)),
            one_lane_traffic_way("0_1"),
        );

        obs.on_traffic_ways_generated(&traffic_ways);
        obs.on_generation_end();
        assert!(obs.take_error().is_none());

        let mut rdr = csv::Reader::from_path(dir.path().join("traffic_ways.csv")).unwrap();
        let rows: Vec<_> = rdr.records().map(|r| r.unwrap()).collect();
        assert_eq!(rows.len(), 2);
        assert_eq!(&rows[0][0], "0_1"); // sorted (0,1) before (1,0)
        assert_eq!(&rows[1][0], "1_0");
        assert_eq!(&rows[0][3], "1"); // lane_count
    }

    #[test]
    fn connection_rows_tagged_with_probe_index() {
        let dir = tmp();
        let writer = CsvWriter::new(dir.path()).unwrap();
        let mut obs = GenerationObserver::new(writer);

        let intersections = vec![
            Intersection {
                center: Point3::new(0.0, 0.0, 0.0),
                connections: vec![TrafficConnection {
                    inbound_traffic_way_id: "1_0".to_string(),
                    inbound_lane_number: 0,
                    outbound_traffic_way_id: "0_1".to_string(),
                }],
            },
            Intersection { center: Point3::new(100.0, 0.0, 0.0), connections: Vec::new() },
        ];

        obs.on_intersections_generated(&intersections);
        obs.on_generation_end();
        assert!(obs.take_error().is_none());

        let mut rdr = csv::Reader::from_path(dir.path().join("connections.csv")).unwrap();
        let rows: Vec<_> = rdr.records().map(|r| r.unwrap()).collect();
        assert_eq!(rows.len(), 1, "second probe has no connections");
        assert_eq!(&rows[0][0], "0"); // probe_index
        assert_eq!(&rows[0][1], "1_0");
    }
}

    use super::*;
    use crate::model::StatusReport;
    use crate::reconcile::{ReconcileOutcome, ReportReconciler};

    #[test]
    fn sparkline_scales_to_the_largest_sample() {
        assert_eq!(sparkline(&[0, 50, 100], 16), "▁▄█");
        assert_eq!(sparkline(&[], 16), "");
        assert_eq!(sparkline(&[-5, 0], 16), "▁▁");
        assert_eq!(sparkline(&[1, 2, 3, 4], 2).chars().count(), 2);
    }

    #[test]
    fn bar_is_clamped_to_its_width() {
        assert_eq!(bar(500_000, 1_000_000, 10), "#####.....");
        assert_eq!(bar(5_000_000, 1_000_000, 4), "####");
        assert_eq!(bar(0, 0, 3), "...");
    }

    #[test]
    fn surface_follows_reconciler_cells() {
        let report = StatusReport {
            timestamp: "12:00".into(),
            overall: OverallState::Ok,
            message: None,
            entries: (0..7)
                .map(|i| {
                    Entry::new(
                        format!("s{}", i),
                        format!("Svc{}", i),
                        vec![i],
                        EntryState::Ok,
                        "",
                    )
                })
                .collect(),
        };
        let mut rec = ReportReconciler::new(GridSurface::default(), 3);
        assert_eq!(rec.on_report(&report), ReconcileOutcome::Rebuilt);

        let surface = rec.surface();
        assert_eq!(surface.columns, 3);
        assert_eq!(surface.timestamp(), "12:00");
        let columns: Vec<usize> = surface.cells.iter().map(|c| c.column).collect();
        assert_eq!(columns, vec![0, 0, 0, 1, 1, 2, 2]);
        assert_eq!(surface.cells[4].label, "Svc4");
    }

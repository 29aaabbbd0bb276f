use chrono::NaiveDate;
use speculate2::speculate;

use classtrack::error::ValidationError;
use classtrack::filter::{from_wire_date, to_wire_date, FilterMode, FilterParams, FilterQuery};
use classtrack::individual::{
    aggregate, validate_total_working_days, Classification, StudentDateFilter, SubjectScope,
};
use classtrack::models::{AttendanceMark, AttendanceStatus, ReportRow, Student};
use classtrack::reconcile::{reconcile, ExistingRecord};
use classtrack::report::{render, RenderedReport, MISSING_DATE};

fn roster() -> Vec<Student> {
    vec![
        Student {
            id: 1,
            roll_no: "24820001".to_string(),
            name: "Aravindh".to_string(),
        },
        Student {
            id: 2,
            roll_no: "24820002".to_string(),
            name: "Aswin".to_string(),
        },
        Student {
            id: 3,
            roll_no: "24820003".to_string(),
            name: "Bavana".to_string(),
        },
    ]
}

fn mark(student_id: i64, status: AttendanceStatus) -> AttendanceMark {
    AttendanceMark { student_id, status }
}

fn report_row(status: AttendanceStatus) -> ReportRow {
    ReportRow {
        date: None,
        roll_no: "24820001".to_string(),
        name: "Aravindh".to_string(),
        status,
    }
}

fn day_query() -> FilterQuery {
    FilterQuery::build(
        FilterMode::Day,
        1,
        FilterParams {
            date: NaiveDate::from_ymd_opt(2024, 3, 5),
            ..Default::default()
        },
    )
    .expect("valid day query")
}

speculate! {
    describe "filter query builder" {
        it "requires a date in day mode" {
            let err = FilterQuery::build(FilterMode::Day, 1, FilterParams::default())
                .unwrap_err();
            assert_eq!(err, ValidationError::MissingParameter("date"));
        }

        it "requires a year in month mode" {
            let err = FilterQuery::build(FilterMode::Month, 1, FilterParams {
                month: Some(3),
                ..Default::default()
            }).unwrap_err();
            assert_eq!(err, ValidationError::MissingParameter("year"));
        }

        it "treats a missing month as all months" {
            let query = FilterQuery::build(FilterMode::Month, 1, FilterParams {
                year: Some(2024),
                ..Default::default()
            }).expect("year alone is enough");

            assert_eq!(query.month, None);
            let params = query.wire_params();
            assert!(params.iter().all(|(k, _)| *k != "month"));
        }

        it "rejects an out-of-range month" {
            let err = FilterQuery::build(FilterMode::Month, 1, FilterParams {
                year: Some(2024),
                month: Some(13),
                ..Default::default()
            }).unwrap_err();
            assert!(matches!(err, ValidationError::InvalidInput(_)));
        }

        it "requires a year in year mode" {
            let err = FilterQuery::build(FilterMode::Year, 1, FilterParams::default())
                .unwrap_err();
            assert_eq!(err, ValidationError::MissingParameter("year"));
        }

        it "zero-pads the month on the wire" {
            let query = FilterQuery::build(FilterMode::Month, 4, FilterParams {
                year: Some(2024),
                month: Some(3),
                ..Default::default()
            }).unwrap();

            let params = query.wire_params();
            assert!(params.contains(&("month", "03".to_string())));
            assert!(params.contains(&("filter_type", "month".to_string())));
        }

        it "converts day-mode dates to day-month-year" {
            let params = day_query().wire_params();
            assert!(params.contains(&("date", "05-03-2024".to_string())));
            assert!(params.contains(&("filter_type", "date".to_string())));
        }

        it "round-trips wire dates" {
            let date = NaiveDate::from_ymd_opt(2024, 3, 5).unwrap();
            assert_eq!(to_wire_date(date), "05-03-2024");
            assert_eq!(from_wire_date("05-03-2024").unwrap(), date);
        }
    }

    describe "attendance reconciler" {
        it "is deterministic and idempotent" {
            let roster = roster();
            let saved = vec![
                mark(1, AttendanceStatus::Present),
                mark(2, AttendanceStatus::None),
                mark(3, AttendanceStatus::AbsentInformed),
            ];

            let first = reconcile(&roster, &saved);
            let second = reconcile(&roster, &saved);
            assert_eq!(first, second);
        }

        it "pre-selects saved marks and reports recorded" {
            let roster = roster();
            let saved = vec![
                mark(1, AttendanceStatus::Present),
                mark(2, AttendanceStatus::AbsentInformed),
                mark(3, AttendanceStatus::AbsentUninformed),
            ];

            let view = reconcile(&roster, &saved);
            assert_eq!(view.existing(), ExistingRecord::Recorded);
            assert_eq!(view.selection(1), Some(AttendanceStatus::Present));
            assert_eq!(view.selection(2), Some(AttendanceStatus::AbsentInformed));
            assert!(view.is_complete());
        }

        it "leaves none placeholders unselected" {
            let roster = roster();
            let saved = vec![
                mark(1, AttendanceStatus::None),
                mark(2, AttendanceStatus::None),
                mark(3, AttendanceStatus::None),
            ];

            let view = reconcile(&roster, &saved);
            assert_eq!(view.existing(), ExistingRecord::NotRecorded);
            assert_eq!(view.selection(1), None);
            assert!(!view.is_complete());
        }

        it "distinguishes no data from no marks yet" {
            let roster = roster();
            let view = reconcile(&roster, &[]);
            assert_eq!(view.existing(), ExistingRecord::NoData);
            assert_eq!(
                view.status_message("05-03-2024"),
                "No data available for the selected criteria."
            );
        }

        it "gates saving on a complete form" {
            let roster = roster();
            let mut view = reconcile(&roster, &[mark(1, AttendanceStatus::Present)]);
            assert!(!view.is_complete());
            assert!(view.marks_for_save().is_err());
            assert_eq!(view.missing(), vec![2, 3]);

            assert!(view.set(2, AttendanceStatus::AbsentInformed));
            assert!(view.set(3, AttendanceStatus::Present));
            assert!(view.is_complete());

            let marks = view.marks_for_save().expect("complete form saves");
            assert_eq!(marks.len(), 3);
            assert!(marks.iter().all(|m| m.status.is_selectable()));
        }

        it "refuses selections for unknown students or the none status" {
            let roster = roster();
            let mut view = reconcile(&roster, &[]);
            assert!(!view.set(99, AttendanceStatus::Present));
            assert!(!view.set(1, AttendanceStatus::None));
            assert_eq!(view.selection(1), None);
        }

        it "ignores marks for students not on the roster" {
            let roster = roster();
            let saved = vec![mark(99, AttendanceStatus::Present)];
            let view = reconcile(&roster, &saved);
            // The stray mark neither selects anyone nor counts as recorded.
            assert_eq!(view.existing(), ExistingRecord::NotRecorded);
            assert!(view.missing().len() == 3);
        }
    }

    describe "report renderer" {
        it "produces an explicit no-records view" {
            let rendered = render(&day_query(), vec![]);
            assert_eq!(rendered, RenderedReport::NoRecords);
        }

        it "detects a day that was never taken" {
            let rows = vec![
                report_row(AttendanceStatus::AbsentUninformed),
                report_row(AttendanceStatus::AbsentUninformed),
                report_row(AttendanceStatus::AbsentUninformed),
            ];
            let rendered = render(&day_query(), rows);
            assert_eq!(rendered, RenderedReport::NeverTaken);
        }

        it "renders a day table when any real mark exists" {
            let rows = vec![
                report_row(AttendanceStatus::Present),
                report_row(AttendanceStatus::AbsentUninformed),
                report_row(AttendanceStatus::AbsentUninformed),
            ];
            let rendered = render(&day_query(), rows);
            let RenderedReport::DayTable(table) = rendered else {
                panic!("expected a day table");
            };
            assert_eq!(table.len(), 3);
            let serials: Vec<usize> = table.iter().map(|r| r.serial).collect();
            assert_eq!(serials, vec![1, 2, 3]);
        }

        it "never suppresses all-default rows in month mode" {
            let query = FilterQuery::build(FilterMode::Month, 1, FilterParams {
                year: Some(2024),
                month: Some(3),
                ..Default::default()
            }).unwrap();

            let rows = vec![
                ReportRow {
                    date: Some("04-03-2024".to_string()),
                    roll_no: "24820001".to_string(),
                    name: "Aravindh".to_string(),
                    status: AttendanceStatus::AbsentUninformed,
                },
                ReportRow {
                    date: Some("05-03-2024".to_string()),
                    roll_no: "24820001".to_string(),
                    name: "Aravindh".to_string(),
                    status: AttendanceStatus::AbsentUninformed,
                },
            ];
            let rendered = render(&query, rows);
            let RenderedReport::DatedTable(table) = rendered else {
                panic!("expected a dated table");
            };
            assert_eq!(table.len(), 2);
            assert_eq!(table[0].date, "04-03-2024");
        }

        it "keeps a dated row's missing date visible" {
            let query = FilterQuery::build(FilterMode::Year, 1, FilterParams {
                year: Some(2024),
                ..Default::default()
            }).unwrap();

            let rows = vec![report_row(AttendanceStatus::Present)];
            let rendered = render(&query, rows);
            let RenderedReport::DatedTable(table) = rendered else {
                panic!("expected a dated table");
            };
            assert_eq!(table[0].date, MISSING_DATE);
            assert!(table[0].date.contains("missing"));
        }
    }

    describe "individual report aggregator" {
        it "rejects zero total working days" {
            let err = aggregate(10, 0).unwrap_err();
            assert!(matches!(err, ValidationError::InvalidInput(_)));
        }

        it "accepts a single working day" {
            let summary = aggregate(1, 1).expect("one day is valid");
            assert_eq!(summary.classification, Classification::Pass);
        }

        it "classifies the 75 percent boundary as a pass" {
            let summary = aggregate(15, 20).unwrap();
            assert_eq!(summary.display_percentage(), "75.00%");
            assert_eq!(summary.classification, Classification::Pass);
        }

        it "classifies below the boundary as a fail" {
            let summary = aggregate(14, 20).unwrap();
            assert_eq!(summary.display_percentage(), "70.00%");
            assert_eq!(summary.classification, Classification::Fail);
        }

        it "keeps the unrounded ratio" {
            let summary = aggregate(1, 3).unwrap();
            assert!((summary.percentage - 100.0 / 3.0).abs() < 1e-12);
            assert_eq!(summary.display_percentage(), "33.33%");
        }

        it "serializes all-subjects as an absent parameter" {
            assert_eq!(SubjectScope::All.wire_param(), None);
            assert_eq!(SubjectScope::One(4).wire_param(), Some("4".to_string()));
        }

        it "validates the working-day total as a standalone precondition" {
            assert!(matches!(
                validate_total_working_days(0),
                Err(ValidationError::InvalidInput(_))
            ));
            assert!(validate_total_working_days(1).is_ok());
        }

        it "selects one date narrowing from the raw flags" {
            let date = NaiveDate::from_ymd_opt(2024, 3, 5);
            assert_eq!(
                StudentDateFilter::from_flags(None, None, None).unwrap(),
                StudentDateFilter::Any
            );
            assert_eq!(
                StudentDateFilter::from_flags(date, None, None).unwrap(),
                StudentDateFilter::Date(date.unwrap())
            );
            assert_eq!(
                StudentDateFilter::from_flags(None, Some(3), None).unwrap(),
                StudentDateFilter::Month(3)
            );
            assert_eq!(
                StudentDateFilter::from_flags(None, None, Some(2024)).unwrap(),
                StudentDateFilter::Year(2024)
            );
        }

        it "rejects conflicting date narrowing flags" {
            let err = StudentDateFilter::from_flags(None, Some(3), Some(2024)).unwrap_err();
            assert!(matches!(err, ValidationError::InvalidInput(_)));

            let date = NaiveDate::from_ymd_opt(2024, 3, 5);
            let err = StudentDateFilter::from_flags(date, None, Some(2024)).unwrap_err();
            assert!(matches!(err, ValidationError::InvalidInput(_)));
        }

        it "rejects an out-of-range month narrowing" {
            let err = StudentDateFilter::from_flags(None, Some(13), None).unwrap_err();
            assert!(matches!(err, ValidationError::InvalidInput(_)));
        }
    }
}

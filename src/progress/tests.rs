//! Tests for progress module
//!
//! These tests verify:
//! - Hours for a single session, including malformed and inverted times
//! - Aggregation into percentage and day blocks
//! - Block grid and share text
//! - Progress endpoints for an authenticated user

#[cfg(test)]
mod tests {
    use crate::entries::models::{EntryDate, TimeEntry};
    use crate::progress::aggregator::{
        aggregate, day_blocks, round_hours, share_text, ProgressSummary,
    };
    use crate::progress::calculator::{
        canonical_time, compute_hours, parse_time_of_day, BreakMinutes, BreakParseError,
    };

    fn entry(id: i64, time_in: &str, time_out: &str, break_time: &str) -> TimeEntry {
        TimeEntry {
            id,
            date: EntryDate::Raw(String::new()),
            time_in: time_in.to_string(),
            time_out: time_out.to_string(),
            break_time: break_time.to_string(),
            note: None,
            created_by: "user-1".to_string(),
        }
    }

    // ============================================================================
    // Calculator Tests
    // ============================================================================

    #[test]
    fn test_parse_time_of_day() {
        assert_eq!(parse_time_of_day("00:00"), Some(0));
        assert_eq!(parse_time_of_day("09:30"), Some(570));
        assert_eq!(parse_time_of_day("9:05"), Some(545));
        assert_eq!(parse_time_of_day("23:59"), Some(1439));
        assert_eq!(parse_time_of_day("24:00"), None);
        assert_eq!(parse_time_of_day("12:60"), None);
        assert_eq!(parse_time_of_day(""), None);
        assert_eq!(parse_time_of_day("noon"), None);
        assert_eq!(parse_time_of_day("12"), None);
    }

    #[test]
    fn test_parse_time_of_day_rejects_signed_and_extra_parts() {
        assert_eq!(parse_time_of_day("+9:+5"), None);
        assert_eq!(parse_time_of_day("+09:05"), None);
        assert_eq!(parse_time_of_day("9:5:0"), None);
        assert_eq!(parse_time_of_day("09:05:00"), None);
        assert_eq!(canonical_time("+9:+5"), None);
    }

    #[test]
    fn test_canonical_time_pads() {
        assert_eq!(canonical_time("9:05").as_deref(), Some("09:05"));
        assert_eq!(canonical_time("17:00").as_deref(), Some("17:00"));
        assert_eq!(canonical_time("7pm"), None);
    }

    #[test]
    fn test_break_parse_strict() {
        assert_eq!(BreakMinutes::parse_strict(""), Ok(BreakMinutes::ZERO));
        assert_eq!(BreakMinutes::parse_strict(" 45 "), Ok(BreakMinutes::new(45)));
        assert_eq!(
            BreakMinutes::parse_strict("-5"),
            Err(BreakParseError::Negative(-5))
        );
        assert!(matches!(
            BreakMinutes::parse_strict("half an hour"),
            Err(BreakParseError::NotANumber(_))
        ));
    }

    #[test]
    fn test_break_parse_strict_out_of_range() {
        assert_eq!(
            BreakMinutes::parse_strict("99999999999"),
            Err(BreakParseError::OutOfRange("99999999999".to_string()))
        );
        assert_eq!(
            BreakMinutes::parse_strict("999999999999999999999999"),
            Err(BreakParseError::OutOfRange("999999999999999999999999".to_string()))
        );
        assert_eq!(
            BreakMinutes::parse_strict("4294967295"),
            Ok(BreakMinutes::new(u32::MAX))
        );
    }

    #[test]
    fn test_break_parse_error_messages() {
        assert_eq!(
            BreakParseError::NotANumber("abc".to_string()).to_string(),
            "'abc' is not a whole number of minutes"
        );
        assert_eq!(
            BreakParseError::Negative(-5).to_string(),
            "break cannot be negative (-5)"
        );
        assert_eq!(
            BreakParseError::OutOfRange("99999999999".to_string()).to_string(),
            "break of 99999999999 minutes is out of range"
        );
    }

    #[test]
    fn test_break_parse_lenient_degrades_to_zero() {
        assert_eq!(BreakMinutes::parse_lenient(None), BreakMinutes::ZERO);
        assert_eq!(BreakMinutes::parse_lenient(Some("abc")), BreakMinutes::ZERO);
        assert_eq!(BreakMinutes::parse_lenient(Some("-30")), BreakMinutes::ZERO);
        assert_eq!(BreakMinutes::parse_lenient(Some("30")), BreakMinutes::new(30));
    }

    #[test]
    fn test_break_storage_form() {
        assert_eq!(BreakMinutes::ZERO.to_storage(), "");
        assert_eq!(BreakMinutes::new(60).to_storage(), "60");
    }

    #[test]
    fn test_compute_hours_full_day_with_lunch() {
        assert_eq!(compute_hours("09:00", "17:00", Some("60")), 7.0);
    }

    #[test]
    fn test_compute_hours_without_break() {
        assert_eq!(compute_hours("08:00", "12:00", Some("")), 4.0);
        assert_eq!(compute_hours("08:00", "12:00", None), 4.0);
    }

    #[test]
    fn test_compute_hours_fractional() {
        assert_eq!(compute_hours("13:00", "17:30", Some("15")), 4.25);
    }

    #[test]
    fn test_compute_hours_missing_times_is_zero() {
        assert_eq!(compute_hours("", "17:00", None), 0.0);
        assert_eq!(compute_hours("09:00", "", None), 0.0);
        assert_eq!(compute_hours("garbage", "17:00", Some("10")), 0.0);
    }

    #[test]
    fn test_compute_hours_inverted_times_clamp_to_zero() {
        assert_eq!(compute_hours("22:00", "06:00", None), 0.0);
        assert_eq!(compute_hours("17:00", "09:00", Some("30")), 0.0);
    }

    #[test]
    fn test_compute_hours_break_longer_than_session_clamps() {
        assert_eq!(compute_hours("09:00", "10:00", Some("90")), 0.0);
    }

    #[test]
    fn test_compute_hours_bad_break_ignored() {
        assert_eq!(compute_hours("09:00", "17:00", Some("lunch")), 8.0);
    }

    #[test]
    fn test_compute_hours_never_negative() {
        let times = ["", "00:00", "06:15", "12:00", "18:45", "23:59", "bad"];
        let breaks = [None, Some(""), Some("0"), Some("30"), Some("2000"), Some("x")];

        for a in times {
            for b in times {
                for br in breaks {
                    let hours = compute_hours(a, b, br);
                    assert!(hours >= 0.0, "{} -> {} ({:?}) gave {}", a, b, br, hours);
                    assert!(hours.is_finite());
                }
            }
        }
    }

    // ============================================================================
    // Aggregator Tests
    // ============================================================================

    #[test]
    fn test_aggregate_single_full_day() {
        let entries = vec![entry(1, "09:00", "17:00", "60")];
        let summary = aggregate(&entries, 500);

        assert_eq!(summary.completed_hours, 7.0);
        assert_eq!(summary.completion_percentage, 1);
        assert_eq!(summary.total_day_blocks, 63);
        assert_eq!(summary.completed_day_blocks, 1);
    }

    #[test]
    fn test_aggregate_two_sessions() {
        let entries = vec![
            entry(1, "08:00", "12:00", ""),
            entry(2, "13:00", "17:30", "15"),
        ];
        let summary = aggregate(&entries, 100);

        assert_eq!(summary.completed_hours, 8.25);
        assert_eq!(summary.completion_percentage, 8);
        assert_eq!(summary.completed_day_blocks, 1);
        assert_eq!(summary.total_day_blocks, 13);
    }

    #[test]
    fn test_aggregate_empty_entries() {
        let summary = aggregate(&[], 486);

        assert_eq!(summary.completed_hours, 0.0);
        assert_eq!(summary.completion_percentage, 0);
        assert_eq!(summary.completed_day_blocks, 0);
        assert_eq!(summary.total_day_blocks, 61);
    }

    #[test]
    fn test_aggregate_zero_required_hours() {
        let entries = vec![entry(1, "09:00", "17:00", "")];
        let summary = aggregate(&entries, 0);

        assert_eq!(summary.completed_hours, 8.0);
        assert_eq!(summary.completion_percentage, 0);
        assert_eq!(summary.completed_day_blocks, 0);
        assert_eq!(summary.total_day_blocks, 0);
    }

    #[test]
    fn test_aggregate_percentage_capped_at_100() {
        let entries: Vec<TimeEntry> = (1..=5).map(|i| entry(i, "08:00", "18:00", "")).collect();
        let summary = aggregate(&entries, 40);

        assert_eq!(summary.completed_hours, 50.0);
        assert_eq!(summary.completion_percentage, 100);
        assert_eq!(summary.total_day_blocks, 5);
        // Independent roundings: completed may exceed total
        assert_eq!(summary.completed_day_blocks, 6);
        assert_eq!(summary.remaining_day_blocks(), 0);
        assert_eq!(summary.remaining_hours(40), 0.0);
    }

    #[test]
    fn test_aggregate_malformed_rows_contribute_nothing() {
        let entries = vec![
            entry(1, "09:00", "17:00", "60"),
            entry(2, "", "17:00", ""),
            entry(3, "17:00", "09:00", ""),
            entry(4, "xx:yy", "10:00", "abc"),
        ];
        let summary = aggregate(&entries, 500);

        assert_eq!(summary.completed_hours, 7.0);
    }

    #[test]
    fn test_aggregate_sums_before_rounding() {
        // 20 minutes = 0.333.. hours each; rounding per row would give 0.99
        let entries: Vec<TimeEntry> = (1..=3).map(|i| entry(i, "09:00", "09:20", "")).collect();
        let summary = aggregate(&entries, 100);

        assert_eq!(summary.completed_hours, 1.0);
    }

    #[test]
    fn test_aggregate_is_idempotent() {
        let entries = vec![
            entry(1, "08:00", "12:00", ""),
            entry(2, "13:00", "17:30", "15"),
        ];

        assert_eq!(aggregate(&entries, 100), aggregate(&entries, 100));
    }

    #[test]
    fn test_remaining_hours() {
        let entries = vec![entry(1, "09:00", "17:00", "60")];
        let summary = aggregate(&entries, 500);

        assert_eq!(summary.remaining_hours(500), 493.0);
        assert_eq!(summary.remaining_day_blocks(), 62);
    }

    #[test]
    fn test_round_hours() {
        assert_eq!(round_hours(1.0 / 3.0), 0.33);
        assert_eq!(round_hours(2.675_1), 2.68);
        assert_eq!(round_hours(0.0), 0.0);
    }

    #[test]
    fn test_summary_serializes_camel_case() {
        let summary = ProgressSummary {
            completed_hours: 7.0,
            completion_percentage: 1,
            completed_day_blocks: 1,
            total_day_blocks: 63,
        };
        let json = serde_json::to_value(summary).expect("serialize");

        assert_eq!(json["completedHours"], 7.0);
        assert_eq!(json["completionPercentage"], 1);
        assert_eq!(json["completedDayBlocks"], 1);
        assert_eq!(json["totalDayBlocks"], 63);
    }

    // ============================================================================
    // Day Block and Share Tests
    // ============================================================================

    #[test]
    fn test_day_blocks_grid() {
        let summary = ProgressSummary {
            completed_hours: 16.0,
            completion_percentage: 67,
            completed_day_blocks: 2,
            total_day_blocks: 3,
        };
        let blocks = day_blocks(&summary);

        assert_eq!(blocks.len(), 3);
        assert_eq!(blocks[0].index, 1);
        assert!(blocks[0].completed);
        assert_eq!(blocks[0].label, "Day 1 - Completed");
        assert!(blocks[1].completed);
        assert!(!blocks[2].completed);
        assert_eq!(blocks[2].label, "Day 3 - Pending");
    }

    #[test]
    fn test_day_blocks_empty_without_target() {
        let summary = aggregate(&[entry(1, "09:00", "17:00", "")], 0);
        assert!(day_blocks(&summary).is_empty());
    }

    #[test]
    fn test_share_text() {
        let summary = aggregate(&[entry(1, "09:00", "17:00", "60")], 500);
        assert_eq!(
            share_text(&summary, 500),
            "I've completed 7 of 500 OJT hours (1%). 1 of 63 days done."
        );

        let summary = aggregate(&[entry(1, "13:00", "17:30", "15")], 0);
        assert_eq!(share_text(&summary, 0), "I've logged 4.25 OJT hours so far.");
    }

    // ============================================================================
    // Endpoint Tests
    // ============================================================================

    mod endpoints {
        use axum::http::{Method, StatusCode};
        use serde_json::json;

        use crate::common::test_support::{send, test_app, token_for};

        #[tokio::test]
        async fn test_progress_requires_auth() {
            let (app, _pool) = test_app().await;
            let (status, _) = send(&app, Method::GET, "/api/progress", None, None).await;
            assert_eq!(status, StatusCode::UNAUTHORIZED);
        }

        #[tokio::test]
        async fn test_progress_reflects_entries_and_target() {
            let (app, _pool) = test_app().await;
            let token = token_for("intern-1", "intern@example.com");

            let (status, _) = send(
                &app,
                Method::PUT,
                "/api/profile/required-hours",
                Some(&token),
                Some(json!({ "requiredHours": 500 })),
            )
            .await;
            assert_eq!(status, StatusCode::OK);

            let (status, _) = send(
                &app,
                Method::POST,
                "/api/entries",
                Some(&token),
                Some(json!({
                    "date": "2026-01-05",
                    "time_in": "09:00",
                    "time_out": "17:00",
                    "break_time": "60"
                })),
            )
            .await;
            assert_eq!(status, StatusCode::CREATED);

            let (status, body) = send(&app, Method::GET, "/api/progress", Some(&token), None).await;
            assert_eq!(status, StatusCode::OK);
            assert_eq!(body["completedHours"], 7.0);
            assert_eq!(body["completionPercentage"], 1);
            assert_eq!(body["completedDayBlocks"], 1);
            assert_eq!(body["totalDayBlocks"], 63);
            assert_eq!(body["requiredHours"], 500);
            assert_eq!(body["remainingHours"], 493.0);
            assert_eq!(body["remainingDayBlocks"], 62);

            let (status, body) =
                send(&app, Method::GET, "/api/progress/blocks", Some(&token), None).await;
            assert_eq!(status, StatusCode::OK);
            assert_eq!(body["blocks"].as_array().map(Vec::len), Some(63));
            assert_eq!(body["blocks"][0]["completed"], true);
            assert_eq!(body["blocks"][1]["label"], "Day 2 - Pending");

            let (status, body) =
                send(&app, Method::GET, "/api/progress/share", Some(&token), None).await;
            assert_eq!(status, StatusCode::OK);
            assert_eq!(
                body["text"],
                "I've completed 7 of 500 OJT hours (1%). 1 of 63 days done."
            );
        }

        #[tokio::test]
        async fn test_progress_for_new_user_without_target() {
            let (app, _pool) = test_app().await;
            let token = token_for("fresh", "fresh@example.com");

            let (status, body) = send(&app, Method::GET, "/api/progress", Some(&token), None).await;
            assert_eq!(status, StatusCode::OK);
            assert_eq!(body["completedHours"], 0.0);
            assert_eq!(body["completionPercentage"], 0);
            assert_eq!(body["totalDayBlocks"], 0);
            assert_eq!(body["requiredHours"], 0);
        }

        #[tokio::test]
        async fn test_progress_ignores_other_users_entries() {
            let (app, _pool) = test_app().await;
            let alice = token_for("alice", "alice@example.com");
            let bob = token_for("bob", "bob@example.com");

            let (status, _) = send(
                &app,
                Method::POST,
                "/api/entries",
                Some(&alice),
                Some(json!({
                    "date": "2026-01-05",
                    "time_in": "08:00",
                    "time_out": "16:00"
                })),
            )
            .await;
            assert_eq!(status, StatusCode::CREATED);

            let (_, body) = send(&app, Method::GET, "/api/progress", Some(&bob), None).await;
            assert_eq!(body["completedHours"], 0.0);
        }
    }
}

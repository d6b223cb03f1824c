mod common;

use chrono::{Datelike, NaiveDate, TimeDelta, Weekday};
use common::{FakePortal, PASSWORD, Reply, SESSION_COOKIE, USERNAME, XSRF_TOKEN, landing_page};
use hrflow::errors::AppError;
use hrflow::models::work_log::{WorkLogEntry, WorkerKind};
use hrflow::portal::work_log::SAVE_ACTION;
use hrflow::portal::{Credentials, Portal, Session};
use serde_json::json;

fn login(portal: &FakePortal) -> Session {
    Portal::new(&portal.base_url())
        .and_then(|p| p.authenticate(&Credentials::new(USERNAME, PASSWORD)))
        .expect("login")
}

fn date(y: i32, m: u32, d: u32) -> NaiveDate {
    NaiveDate::from_ymd_opt(y, m, d).expect("valid date")
}

fn entry(kind: WorkerKind, from: (u32, u32), to: (u32, u32)) -> WorkLogEntry {
    let day = date(2020, 2, 25);
    WorkLogEntry::new(
        day.and_hms_opt(from.0, from.1, 0).expect("time"),
        day.and_hms_opt(to.0, to.1, 0).expect("time"),
        kind,
    )
}

#[test]
fn test_calendar_request_and_result() {
    let portal = FakePortal::start();
    let session = login(&portal);

    let days = session
        .calendar(date(2020, 4, 10), date(2020, 4, 14))
        .expect("calendar");

    let dates: Vec<NaiveDate> = days.iter().map(|d| d.date).collect();
    assert_eq!(
        dates,
        vec![
            date(2020, 4, 10),
            date(2020, 4, 11),
            date(2020, 4, 13),
            date(2020, 4, 14)
        ]
    );

    for d in &days {
        assert_eq!(d.weekday, Some(d.date.weekday()), "{}", d.date);
    }
    assert_eq!(days[0].weekday, Some(Weekday::Fri));
    assert!(!days[0].workday);
    assert!(days[0].holiday_calc);
    assert_eq!(days[0].description, "Good Friday");
    assert!(days[1].is_weekend());
    assert!(days[3].workday);

    let req = portal.first_request_to("/calendar/GetCalendar");
    assert_eq!(req.method, "GET");
    assert_eq!(req.header("X-XSRF-TOKEN"), Some(XSRF_TOKEN));
    assert_eq!(req.header("Accept"), Some("application/json"));
    assert_eq!(
        req.header("Content-Type"),
        Some("application/x-www-form-urlencoded; charset=utf-8")
    );

    let form = req.form();
    assert_eq!(form["startDate"], "10.04.2020");
    assert_eq!(form["endDate"], "14.04.2020");
}

#[test]
fn test_calendar_unknown_weekday_code() {
    let portal = FakePortal::with_overrides(vec![(
        "/KirjaamoWeb/calendar/GetCalendar",
        Reply::json(
            r#"[{"date":"2020-04-15T00:00:00","workDay":true,"holiday":true,"description":" ","weekDay":3},
                {"date":"2020-04-16T00:00:00","workDay":true,"holiday":true,"description":" ","weekDay":"9"}]"#,
        ),
    )]);
    let session = login(&portal);

    let days = session
        .calendar(date(2020, 4, 15), date(2020, 4, 16))
        .expect("calendar");
    assert_eq!(days[0].weekday, Some(Weekday::Wed));
    assert_eq!(days[1].weekday, None);
    assert!(!days[1].is_weekend());
}

#[test]
fn test_calendar_not_json() {
    let portal = FakePortal::with_overrides(vec![(
        "/KirjaamoWeb/calendar/GetCalendar",
        Reply::html("<html>login expired</html>"),
    )]);
    let session = login(&portal);

    let err = session
        .calendar(date(2020, 4, 10), date(2020, 4, 14))
        .unwrap_err();
    assert!(matches!(
        err,
        AppError::Decode {
            operation: "getting calendar",
            ..
        }
    ));
}

#[test]
fn test_absences_request_and_result() {
    let portal = FakePortal::start();
    let session = login(&portal);

    let absences = session
        .absences(session.employments(), date(2020, 8, 1), date(2020, 9, 30))
        .expect("absences");

    assert_eq!(absences.len(), 2);
    assert_eq!(absences[0].id, "a-1");
    assert_eq!(absences[0].start_date, date(2020, 8, 3));
    assert_eq!(absences[0].end_date, date(2020, 8, 11));
    assert_eq!(absences[0].info, "Annual leave");
    assert_eq!(absences[0].days().len(), 9);
    assert_eq!(absences[1].days(), vec![date(2020, 9, 14)]);

    let req = portal.first_request_to("/employee/GetAbsences");
    assert_eq!(req.method, "POST");
    assert_eq!(req.header("X-XSRF-TOKEN"), Some(XSRF_TOKEN));
    assert_eq!(req.header("Accept"), None);
    assert!(req.header("Cookie").is_some_and(|c| c.contains(SESSION_COOKIE)));

    let filter = req.form_json("workLogRequest");
    assert_eq!(filter["lang"], json!(2));
    assert_eq!(filter["startDate"], json!("01.08.2020"));
    assert_eq!(filter["endDate"], json!("30.09.2020"));
    assert_eq!(filter["searchDateType"], json!("DATE"));
    assert_eq!(filter["getAll"], json!(true));
    assert_eq!(
        filter["statusList"],
        json!(["NEW", "SENT", "REJECTED", "TRANSFERRED", "WAITINGAPPROVAL"])
    );
    assert_eq!(filter["employments"][0]["employmentId"], json!(5511));
    assert_eq!(filter["employments"][0]["orgUnit"], json!("R&D"));
}

#[test]
fn test_absences_business_error() {
    let portal = FakePortal::with_overrides(vec![(
        "/KirjaamoWeb/employee/GetAbsences",
        Reply::json(r#"{"absencesInfos":null,"error":"Employment not found"}"#),
    )]);
    let session = login(&portal);

    match session.absences(session.employments(), date(2020, 8, 1), date(2020, 8, 31)) {
        Err(AppError::RemoteBusinessError { operation, message }) => {
            assert_eq!(operation, "getting absences");
            assert_eq!(message, "Employment not found");
        }
        other => panic!("unexpected result: {other:?}"),
    }
}

#[test]
fn test_absences_unexpected_text() {
    let portal = FakePortal::with_overrides(vec![(
        "/KirjaamoWeb/employee/GetAbsences",
        Reply::json(r#"{"absencesInfos":[{"id":"x","absenceInfoText":"Annual leave"}]}"#),
    )]);
    let session = login(&portal);

    let err = session
        .absences(session.employments(), date(2020, 8, 1), date(2020, 8, 31))
        .unwrap_err();
    assert!(matches!(err, AppError::AbsenceFormatMismatch(text) if text == "Annual leave"));
}

#[test]
fn test_absences_empty_list() {
    let portal = FakePortal::with_overrides(vec![(
        "/KirjaamoWeb/employee/GetAbsences",
        Reply::json(r#"{"absencesInfos":[]}"#),
    )]);
    let session = login(&portal);

    let absences = session
        .absences(session.employments(), date(2020, 8, 1), date(2020, 8, 31))
        .expect("absences");
    assert!(absences.is_empty());
}

#[test]
fn test_daily_work_amount_request_and_result() {
    let portal = FakePortal::start();
    let session = login(&portal);

    let amounts = session
        .daily_work_amount(session.employments(), date(2020, 8, 1), date(2020, 8, 31))
        .expect("work amounts");

    assert_eq!(amounts.len(), 2);
    assert_eq!(amounts[0].date, date(2020, 8, 12));
    assert_eq!(amounts[0].amount, TimeDelta::minutes(450));
    assert_eq!(amounts[0].entry_count, 1);
    assert_eq!(amounts[0].lunch_break, TimeDelta::minutes(30));
    assert_eq!(
        amounts[0].next_start_time,
        date(2020, 8, 13).and_hms_opt(8, 0, 0)
    );
    assert_eq!(amounts[1].amount, TimeDelta::minutes(495));
    assert_eq!(amounts[1].lunch_break, TimeDelta::zero());
    assert_eq!(amounts[1].next_start_time, None);

    let req = portal.first_request_to("/employee/GetDailyWorkAmount");
    assert_eq!(req.header("Accept"), None);
    assert_eq!(req.header("X-XSRF-TOKEN"), Some(XSRF_TOKEN));
    assert!(req.header("Cookie").is_some_and(|c| c.contains(SESSION_COOKIE)));
    let filter = req.form_json("workLogRequest");
    assert_eq!(filter["startDate"], json!("01.08.2020"));
    assert_eq!(filter["endDate"], json!("31.08.2020"));
}

#[test]
fn test_daily_work_amount_business_error() {
    let portal = FakePortal::with_overrides(vec![(
        "/KirjaamoWeb/employee/GetDailyWorkAmount",
        Reply::json(r#"{"error":"No access"}"#),
    )]);
    let session = login(&portal);

    let err = session
        .daily_work_amount(session.employments(), date(2020, 8, 1), date(2020, 8, 31))
        .unwrap_err();
    assert!(matches!(err, AppError::RemoteBusinessError { .. }));
}

#[test]
fn test_daily_work_amount_out_of_range_values() {
    for body in [
        r#"{"dailyWorkAmountList":[{"date":"2020-08-12T00:00:00","hours":1e300,"hoursCount":1,"lunchBreak":30}]}"#,
        r#"{"dailyWorkAmountList":[{"date":"2020-08-12T00:00:00","hours":7.5,"hoursCount":1,"lunchBreak":9223372036854775807}]}"#,
    ] {
        let portal = FakePortal::with_overrides(vec![(
            "/KirjaamoWeb/employee/GetDailyWorkAmount",
            Reply::json(body),
        )]);
        let session = login(&portal);

        match session.daily_work_amount(session.employments(), date(2020, 8, 1), date(2020, 8, 31)) {
            Err(AppError::Decode { operation, .. }) => {
                assert_eq!(operation, "getting daily work amount")
            }
            other => panic!("unexpected result: {other:?}"),
        }
    }
}

#[test]
fn test_daily_work_amount_server_error() {
    let portal = FakePortal::with_overrides(vec![(
        "/KirjaamoWeb/employee/GetDailyWorkAmount",
        Reply::status(500),
    )]);
    let session = login(&portal);

    match session.daily_work_amount(session.employments(), date(2020, 8, 1), date(2020, 8, 31)) {
        Err(AppError::RemoteError { operation, status }) => {
            assert_eq!(operation, "getting daily work amount");
            assert!(status.starts_with("500"), "{status}");
        }
        other => panic!("unexpected result: {other:?}"),
    }
}

#[test]
fn test_new_work_log_monthly() {
    let portal = FakePortal::start();
    let session = login(&portal);

    let mut e = entry(WorkerKind::Monthly, (8, 0), (15, 30));
    e.comment = "Sprint planning".into();
    e.project = Some("1234 Internal tools".into());
    session.new_work_log(&e).expect("work log");

    let req = portal.first_request_to("/employee/NewWorkLogRow");
    assert_eq!(req.method, "POST");
    assert_eq!(req.header("X-XSRF-TOKEN"), Some(XSRF_TOKEN));
    assert_eq!(req.header("Accept"), Some("application/json"));

    let form = req.form();
    assert_eq!(form["action"], SAVE_ACTION);
    assert_eq!(form["copyToDates"], "[]");

    let row = req.form_json("workLogRow");
    assert_eq!(row["mainAmount"], json!("7.500"));
    assert_eq!(row["mainUnit"], json!("DURATION"));
    assert_eq!(row["salaryGroupValue"], json!("99002"));
    assert_eq!(row["status"], json!("NEW"));
    assert_eq!(row["versionId"], json!(3));
    assert_eq!(row["customerId"], json!(1));
    assert_eq!(row["mainSalaryFactorId"], json!(1));
    assert_eq!(row["employmentId"], json!(5511));
    assert_eq!(row["personId"], json!(4242));
    assert_eq!(row["groupId"], json!(77));
    assert_eq!(row["date"], json!("2020-02-25 00:00:00.000"));
    assert_eq!(row["startTime"], json!("2020-02-25 08:00:00.000"));
    assert_eq!(row["endTime"], json!("2020-02-25 15:30:00.000"));
    assert_eq!(row["lunchBreak"], json!(30));
    assert_eq!(row["cutLunchFromAmount"], json!("Y"));
    assert_eq!(row["entryText"], json!("Sprint planning"));
    assert_eq!(row["entryTextType"], json!("TEXTHASHTAG"));
    assert_eq!(row["modifiedBy"], json!(USERNAME));
    assert_eq!(row["lastModifierUser_Id"], json!(0));
    assert_eq!(row["workLogFactors"][0]["unit"], json!("DURATION"));
    assert_eq!(row["workLogFactors"][0]["creator"], json!(USERNAME));

    let links = row["workLogRowLinks"].as_array().expect("links");
    assert_eq!(links.len(), 3);
    assert_eq!(links[0]["listId"], json!("OSASTOT"));
    assert_eq!(links[0]["colNumber"], json!(7));
    assert_eq!(links[0]["value"], json!(null));
    assert_eq!(links[1]["listId"], json!("KUSTPAIKAT"));
    assert_eq!(links[1]["colNumber"], json!(8));
    assert_eq!(links[2]["listId"], json!("PROJEKTIT"));
    assert_eq!(links[2]["colNumber"], json!(9));
    assert_eq!(links[2]["value"], json!("1234"));
    assert_eq!(links[2]["label"], json!("1234 Internal tools"));

    let request = req.form_json("workLogRequest");
    assert_eq!(request["isFixedProcess"], json!(true));
    assert_eq!(request["getListsLabels"], json!(false));
    assert_eq!(request["viewName"], json!("employee"));
    assert_eq!(request["lang"], json!("2"));
    assert_eq!(request["statusList"], json!(["NEW"]));
    assert_eq!(request["emailReceiver"], json!(USERNAME));
    assert_eq!(request["emailChangesText"], json!("Save"));
    assert_eq!(request["employments"][0]["personId"], json!(4242));
}

#[test]
fn test_new_work_log_hourly_without_project() {
    let portal = FakePortal::start();
    let session = login(&portal);

    session
        .new_work_log(&entry(WorkerKind::Hourly, (9, 0), (10, 0)))
        .expect("work log");

    let row = portal.first_request_to("/employee/NewWorkLogRow").form_json("workLogRow");
    assert_eq!(row["mainAmount"], json!("1.000"));
    assert_eq!(row["mainUnit"], json!("HOURS"));
    assert_eq!(row["salaryGroupValue"], json!("11000"));
    assert_eq!(row["lunchBreak"], json!(0));
    assert_eq!(row["cutLunchFromAmount"], json!("N"));
    assert_eq!(row["workLogRowLinks"][2]["value"], json!(null));
    assert_eq!(row["workLogRowLinks"][2]["label"], json!(null));
}

#[test]
fn test_new_work_log_lunch_override() {
    let portal = FakePortal::start();
    let session = login(&portal);

    let mut e = entry(WorkerKind::Monthly, (8, 0), (12, 0));
    e.include_lunch = false;
    session.new_work_log(&e).expect("work log");

    let row = portal.first_request_to("/employee/NewWorkLogRow").form_json("workLogRow");
    assert_eq!(row["salaryGroupValue"], json!("99002"));
    assert_eq!(row["lunchBreak"], json!(0));
    assert_eq!(row["cutLunchFromAmount"], json!("N"));
}

#[test]
fn test_new_work_log_rejected() {
    for body in [r#"{"actionSuccessful":false}"#, "{}"] {
        let portal = FakePortal::with_overrides(vec![(
            "/KirjaamoWeb/employee/NewWorkLogRow",
            Reply::json(body),
        )]);
        let session = login(&portal);

        let err = session
            .new_work_log(&entry(WorkerKind::Monthly, (8, 0), (16, 0)))
            .unwrap_err();
        assert!(matches!(err, AppError::SubmissionRejected), "{body}");
    }
}

#[test]
fn test_new_work_log_server_error() {
    let portal = FakePortal::with_overrides(vec![(
        "/KirjaamoWeb/employee/NewWorkLogRow",
        Reply::status(500),
    )]);
    let session = login(&portal);

    match session.new_work_log(&entry(WorkerKind::Monthly, (8, 0), (16, 0))) {
        Err(AppError::RemoteError { operation, status }) => {
            assert_eq!(operation, "creating work log");
            assert!(status.contains("500"));
        }
        other => panic!("unexpected result: {other:?}"),
    }
}

#[test]
fn test_new_work_log_without_employment() {
    let page = landing_page()
        .lines()
        .map(|l| {
            if l.contains("var employments") {
                "    var employments = [];".to_string()
            } else {
                l.to_string()
            }
        })
        .collect::<Vec<_>>()
        .join("\n");
    let portal =
        FakePortal::with_overrides(vec![("/KirjaamoWeb/signin-complete", Reply::html(page))]);
    let session = login(&portal);
    assert!(session.employments().is_empty());

    let err = session
        .new_work_log(&entry(WorkerKind::Monthly, (8, 0), (16, 0)))
        .unwrap_err();
    assert!(matches!(err, AppError::NoEmployment));
    assert!(portal.requests_to("/employee/NewWorkLogRow").is_empty());
}

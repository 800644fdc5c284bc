//! Tests for the milk crate
//!
//! Use cases and routes are exercised against the in-memory store.

#[cfg(test)]
mod price_tests {
    use crate::InMemoryMilkRepository;
    use crate::application::price::{PRICE_UPDATED_MESSAGE, PriceUseCase};
    use crate::error::MilkError;
    use rust_decimal_macros::dec;
    use std::sync::Arc;

    #[tokio::test]
    async fn test_set_then_get_returns_same_price() {
        let repo = InMemoryMilkRepository::new();
        let use_case = PriceUseCase::new(Arc::new(repo.clone()));

        for value in [dec!(60), dec!(0.01), dec!(62.5)] {
            let output = use_case.set(value).await.unwrap();
            assert_eq!(output.message, PRICE_UPDATED_MESSAGE);
            assert_eq!(use_case.current().await.unwrap().unwrap().value(), value);
            assert_eq!(repo.price_count().await, 1);
        }
    }

    #[tokio::test]
    async fn test_first_set_reports_no_replacement() {
        let use_case = PriceUseCase::new(Arc::new(InMemoryMilkRepository::new()));
        assert!(use_case.current().await.unwrap().is_none());
        assert!(!use_case.set(dec!(60)).await.unwrap().replaced);
        assert!(use_case.set(dec!(64)).await.unwrap().replaced);
    }

    #[tokio::test]
    async fn test_non_positive_price_rejected() {
        let repo = InMemoryMilkRepository::new();
        let use_case = PriceUseCase::new(Arc::new(repo.clone()));
        use_case.set(dec!(60)).await.unwrap();

        let result = use_case.set(dec!(0)).await;
        assert!(matches!(result, Err(MilkError::InvalidPrice(_))));
        // The previous price survives.
        assert_eq!(use_case.current().await.unwrap().unwrap().value(), dec!(60));
    }
}

#[cfg(test)]
mod entry_tests {
    use crate::InMemoryMilkRepository;
    use crate::application::daily_entry::{DailyEntryUseCase, SubmitEntryInput};
    use crate::application::price::PriceUseCase;
    use crate::domain::entities::{ConsumptionRecord, PriceRecord};
    use crate::domain::entry_state::EntryState;
    use crate::domain::repository::{ConsumptionRepository, PriceRepository};
    use crate::domain::value_objects::{EntryDate, Price, Quantity, ReportRange, ReportSort};
    use crate::error::{MilkError, MilkResult};
    use rust_decimal::Decimal;
    use rust_decimal_macros::dec;
    use std::sync::Arc;

    fn date(s: &str) -> EntryDate {
        EntryDate::parse(s).unwrap()
    }

    fn input(d: &str, q: Decimal) -> SubmitEntryInput {
        SubmitEntryInput {
            date: date(d),
            quantity: Quantity::new(q).unwrap(),
        }
    }

    async fn priced_repo() -> InMemoryMilkRepository {
        let repo = InMemoryMilkRepository::new();
        PriceUseCase::new(Arc::new(repo.clone()))
            .set(dec!(60))
            .await
            .unwrap();
        repo
    }

    fn use_case(repo: &InMemoryMilkRepository) -> DailyEntryUseCase<InMemoryMilkRepository, InMemoryMilkRepository> {
        let repo = Arc::new(repo.clone());
        DailyEntryUseCase::new(repo.clone(), repo)
    }

    #[tokio::test]
    async fn test_lookup_without_price() {
        let repo = InMemoryMilkRepository::new();
        let state = use_case(&repo).lookup(Some(date("2024-06-01"))).await;
        assert_eq!(
            state,
            EntryState::NoPriceSet {
                date: date("2024-06-01")
            }
        );
    }

    #[tokio::test]
    async fn test_lookup_defaults_to_today() {
        let repo = priced_repo().await;
        let state = use_case(&repo).lookup(None).await;
        assert_eq!(state.date(), EntryDate::today());
        assert!(state.can_submit());
    }

    #[tokio::test]
    async fn test_submit_records_and_advances() {
        let repo = priced_repo().await;
        let entries = use_case(&repo);

        let output = entries.submit(input("2024-06-30", dec!(2))).await.unwrap();
        assert_eq!(output.recorded.date, date("2024-06-30"));
        assert_eq!(output.recorded.quantity.value(), dec!(2));
        assert_eq!(output.next.date(), date("2024-07-01"));
        assert!(output.next.can_submit());
        assert_eq!(repo.record_count(&date("2024-06-30")).await, 1);

        let state = entries.lookup(Some(date("2024-06-30"))).await;
        assert!(state.is_locked());
        assert_eq!(state.quantity().map(|q| q.value()), Some(dec!(2)));
    }

    #[tokio::test]
    async fn test_second_submit_for_same_date_is_locked() {
        let repo = priced_repo().await;
        let entries = use_case(&repo);

        entries.submit(input("2024-06-01", dec!(1))).await.unwrap();
        let result = entries.submit(input("2024-06-01", dec!(3))).await;

        assert!(matches!(result, Err(MilkError::EntryLocked { .. })));
        assert_eq!(repo.record_count(&date("2024-06-01")).await, 1);
    }

    #[tokio::test]
    async fn test_submit_without_price() {
        let repo = InMemoryMilkRepository::new();
        let result = use_case(&repo).submit(input("2024-06-01", dec!(1))).await;
        assert!(matches!(result, Err(MilkError::PriceNotSet)));
        assert_eq!(repo.record_count(&date("2024-06-01")).await, 0);
    }

    #[tokio::test]
    async fn test_next_day_already_recorded() {
        let repo = priced_repo().await;
        let entries = use_case(&repo);

        entries.submit(input("2024-06-02", dec!(1))).await.unwrap();
        let output = entries.submit(input("2024-06-01", dec!(0))).await.unwrap();

        assert!(output.next.is_locked());
        assert_eq!(output.next.date(), date("2024-06-02"));
    }

    #[tokio::test]
    async fn test_create_rejects_second_record_for_date() {
        let repo = InMemoryMilkRepository::new();
        let first = ConsumptionRecord::new(date("2024-06-01"), Quantity::new(dec!(1)).unwrap());
        let second = ConsumptionRecord::new(date("2024-06-01"), Quantity::new(dec!(2)).unwrap());

        repo.create(&first).await.unwrap();
        let result = repo.create(&second).await;

        assert!(matches!(result, Err(MilkError::EntryLocked { .. })));
        assert_eq!(repo.record_count(&date("2024-06-01")).await, 1);
    }

    /// Ledger whose reads and writes all fail, as with an unreachable database
    #[derive(Clone)]
    struct UnreachableStore;

    fn unreachable() -> MilkError {
        MilkError::Database(sqlx::Error::PoolTimedOut)
    }

    impl PriceRepository for UnreachableStore {
        async fn current(&self) -> MilkResult<Option<PriceRecord>> {
            Err(unreachable())
        }

        async fn replace(&self, _record: &PriceRecord) -> MilkResult<()> {
            Err(unreachable())
        }
    }

    impl ConsumptionRepository for UnreachableStore {
        async fn find_by_date(&self, _date: &EntryDate) -> MilkResult<Option<ConsumptionRecord>> {
            Err(unreachable())
        }

        async fn create(&self, _record: &ConsumptionRecord) -> MilkResult<()> {
            Err(unreachable())
        }

        async fn list_in_range(
            &self,
            _range: &ReportRange,
            _sort: ReportSort,
        ) -> MilkResult<Vec<ConsumptionRecord>> {
            Err(unreachable())
        }
    }

    /// Ledger that misses records on lookup, so a concurrent writer wins the
    /// insert after the availability check
    #[derive(Clone)]
    struct StaleReadStore(InMemoryMilkRepository);

    impl ConsumptionRepository for StaleReadStore {
        async fn find_by_date(&self, _date: &EntryDate) -> MilkResult<Option<ConsumptionRecord>> {
            Ok(None)
        }

        async fn create(&self, record: &ConsumptionRecord) -> MilkResult<()> {
            self.0.create(record).await
        }

        async fn list_in_range(
            &self,
            range: &ReportRange,
            sort: ReportSort,
        ) -> MilkResult<Vec<ConsumptionRecord>> {
            self.0.list_in_range(range, sort).await
        }
    }

    #[tokio::test]
    async fn test_ledger_failure_stops_with_price_kept() {
        let repo = priced_repo().await;
        let entries = DailyEntryUseCase::new(Arc::new(repo), Arc::new(UnreachableStore));

        let state = entries.lookup(Some(date("2024-06-01"))).await;

        assert_eq!(
            state,
            EntryState::Stopped {
                date: date("2024-06-01"),
                price: Some(Price::new(dec!(60)).unwrap()),
            }
        );
        assert!(!state.can_submit());
    }

    #[tokio::test]
    async fn test_price_failure_stops_without_price() {
        let entries = DailyEntryUseCase::new(
            Arc::new(UnreachableStore),
            Arc::new(InMemoryMilkRepository::new()),
        );

        let state = entries.lookup(Some(date("2024-06-01"))).await;

        assert_eq!(
            state,
            EntryState::Stopped {
                date: date("2024-06-01"),
                price: None,
            }
        );
    }

    #[tokio::test]
    async fn test_submit_surfaces_store_failure() {
        let entries = DailyEntryUseCase::new(Arc::new(UnreachableStore), Arc::new(UnreachableStore));
        let result = entries.submit(input("2024-06-01", dec!(1))).await;
        assert!(matches!(result, Err(MilkError::Database(_))));
    }

    #[tokio::test]
    async fn test_submit_losing_insert_race_is_locked() {
        let repo = priced_repo().await;
        let ledger = StaleReadStore(repo.clone());
        let entries = DailyEntryUseCase::new(Arc::new(repo.clone()), Arc::new(ledger));

        entries.submit(input("2024-06-01", dec!(1))).await.unwrap();
        let result = entries.submit(input("2024-06-01", dec!(4))).await;

        assert!(matches!(result, Err(MilkError::EntryLocked { .. })));
        assert_eq!(repo.record_count(&date("2024-06-01")).await, 1);
    }
}

#[cfg(test)]
mod report_tests {
    use crate::InMemoryMilkRepository;
    use crate::application::config::MilkConfig;
    use crate::application::monthly_report::{MonthlyReportUseCase, ReportQuery};
    use crate::domain::entities::{ConsumptionRecord, PriceRecord};
    use crate::domain::repository::{ConsumptionRepository, PriceRepository};
    use crate::domain::value_objects::{
        EntryDate, Price, Quantity, ReportMonth, ReportSort, SortField, SortOrder,
    };
    use crate::error::MilkError;
    use rust_decimal::Decimal;
    use rust_decimal_macros::dec;
    use std::sync::Arc;

    async fn seed(repo: &InMemoryMilkRepository, rows: &[(&str, Decimal)]) {
        for (date, quantity) in rows {
            let record = ConsumptionRecord::new(
                EntryDate::parse(date).unwrap(),
                Quantity::new(*quantity).unwrap(),
            );
            repo.create(&record).await.unwrap();
        }
    }

    async fn set_price(repo: &InMemoryMilkRepository, value: Decimal) {
        repo.replace(&PriceRecord::new(Price::new(value).unwrap()))
            .await
            .unwrap();
    }

    fn use_case(
        repo: &InMemoryMilkRepository,
    ) -> MonthlyReportUseCase<InMemoryMilkRepository, InMemoryMilkRepository> {
        let repo = Arc::new(repo.clone());
        MonthlyReportUseCase::new(repo.clone(), repo, Arc::new(MilkConfig::default()))
    }

    fn query(month: &str, field: SortField, order: SortOrder) -> ReportQuery {
        ReportQuery {
            month: ReportMonth::parse(month).unwrap(),
            sort: ReportSort::new(field, order),
        }
    }

    fn dates(report: &crate::domain::report::MonthlyReport) -> Vec<String> {
        report.rows.iter().map(|r| r.date.as_iso()).collect()
    }

    #[tokio::test]
    async fn test_totals() {
        let repo = InMemoryMilkRepository::new();
        set_price(&repo, dec!(60)).await;
        seed(&repo, &[("2024-06-01", dec!(2.0)), ("2024-06-02", dec!(1.5))]).await;

        let report = use_case(&repo)
            .execute(query("2024-06", SortField::Date, SortOrder::Asc))
            .await
            .unwrap();

        assert_eq!(report.total_quantity, dec!(3.5));
        assert_eq!(report.total_cost, Some(dec!(210)));
        assert_eq!(dates(&report), ["2024-06-01", "2024-06-02"]);
    }

    #[tokio::test]
    async fn test_sort_by_quantity() {
        let repo = InMemoryMilkRepository::new();
        seed(
            &repo,
            &[
                ("2024-06-03", dec!(1)),
                ("2024-06-01", dec!(2)),
                ("2024-06-02", dec!(0.5)),
                ("2024-06-04", dec!(2)),
            ],
        )
        .await;

        let desc = use_case(&repo)
            .execute(query("2024-06", SortField::Quantity, SortOrder::Desc))
            .await
            .unwrap();
        // Equal quantities fall back to date ascending.
        assert_eq!(
            dates(&desc),
            ["2024-06-01", "2024-06-04", "2024-06-03", "2024-06-02"]
        );

        let asc = use_case(&repo)
            .execute(query("2024-06", SortField::Quantity, SortOrder::Asc))
            .await
            .unwrap();
        assert_eq!(
            dates(&asc),
            ["2024-06-02", "2024-06-03", "2024-06-01", "2024-06-04"]
        );
    }

    #[tokio::test]
    async fn test_month_boundaries() {
        let repo = InMemoryMilkRepository::new();
        seed(
            &repo,
            &[
                ("2024-01-31", dec!(1)),
                ("2024-02-01", dec!(1)),
                ("2024-02-28", dec!(1)),
                ("2024-02-29", dec!(1)),
                ("2024-03-01", dec!(1)),
            ],
        )
        .await;

        let report = use_case(&repo)
            .execute(query("2024-02", SortField::Date, SortOrder::Asc))
            .await
            .unwrap();
        assert_eq!(dates(&report), ["2024-02-01", "2024-02-28", "2024-02-29"]);
        assert_eq!(report.total_cost, None);
    }

    #[tokio::test]
    async fn test_export_empty_month_rejected() {
        let repo = InMemoryMilkRepository::new();
        let result = use_case(&repo)
            .export(query("2024-06", SortField::Date, SortOrder::Asc))
            .await;
        assert!(matches!(result, Err(MilkError::EmptyReport { .. })));
    }

    #[tokio::test]
    async fn test_export_names_file_by_month() {
        let repo = InMemoryMilkRepository::new();
        seed(&repo, &[("2024-06-01", dec!(1))]).await;

        let exported = use_case(&repo)
            .export(query("2024-06", SortField::Date, SortOrder::Asc))
            .await
            .unwrap();
        assert_eq!(exported.file_name, "milk_report_2024-06.xlsx");
        assert_eq!(exported.rows, 1);
        // xlsx files are zip archives
        assert_eq!(&exported.bytes[..2], b"PK");
    }
}

#[cfg(test)]
mod router_tests {
    use crate::{InMemoryMilkRepository, MilkConfig, milk_router_generic};
    use axum::Router;
    use axum::body::{Body, to_bytes};
    use axum::http::{Request, StatusCode, header};
    use rust_decimal::Decimal;
    use rust_decimal_macros::dec;
    use serde_json::{Value, json};
    use std::str::FromStr;
    use tower::ServiceExt;

    fn app() -> Router {
        milk_router_generic(InMemoryMilkRepository::new(), MilkConfig::default())
    }

    async fn send(app: &Router, request: Request<Body>) -> (StatusCode, Value) {
        let response = app.clone().oneshot(request).await.unwrap();
        let status = response.status();
        let bytes = to_bytes(response.into_body(), usize::MAX).await.unwrap();
        let body = serde_json::from_slice(&bytes).unwrap_or(Value::Null);
        (status, body)
    }

    fn json_request(method: &str, uri: &str, body: Value) -> Request<Body> {
        Request::builder()
            .method(method)
            .uri(uri)
            .header(header::CONTENT_TYPE, "application/json")
            .body(Body::from(body.to_string()))
            .unwrap()
    }

    fn get(uri: &str) -> Request<Body> {
        Request::builder().uri(uri).body(Body::empty()).unwrap()
    }

    fn decimal(value: &Value) -> Decimal {
        Decimal::from_str(value.as_str().unwrap()).unwrap()
    }

    #[tokio::test]
    async fn test_price_round_trip() {
        let app = app();

        let (status, body) = send(&app, get("/price")).await;
        assert_eq!(status, StatusCode::OK);
        assert_eq!(body["price"], Value::Null);
        assert_eq!(body["currencySymbol"], "₹");

        let (status, body) = send(&app, json_request("PUT", "/price", json!({"price": 60}))).await;
        assert_eq!(status, StatusCode::OK);
        assert_eq!(body["message"], "Price updated successfully.");

        let (_, body) = send(&app, get("/price")).await;
        assert_eq!(decimal(&body["price"]), dec!(60));
    }

    #[tokio::test]
    async fn test_invalid_price_is_problem_document() {
        let app = app();
        let request = json_request("PUT", "/price", json!({"price": -5}));
        let response = app.clone().oneshot(request).await.unwrap();

        assert_eq!(response.status(), StatusCode::BAD_REQUEST);
        assert_eq!(
            response.headers().get(header::CONTENT_TYPE).unwrap(),
            "application/problem+json"
        );

        let (status, _) =
            send(&app, json_request("PUT", "/price", json!({"price": "sixty"}))).await;
        assert_eq!(status, StatusCode::BAD_REQUEST);
    }

    #[tokio::test]
    async fn test_entry_flow() {
        let app = app();

        let (status, body) = send(
            &app,
            json_request("POST", "/entries", json!({"date": "2024-06-01", "quantity": 2})),
        )
        .await;
        assert_eq!(status, StatusCode::UNPROCESSABLE_ENTITY);
        assert_eq!(body["action"], "Set a per-liter price first");

        send(&app, json_request("PUT", "/price", json!({"price": 60}))).await;

        let (_, body) = send(&app, get("/entries?date=2024-06-01")).await;
        assert_eq!(body["state"], "noRecordForDate");
        assert_eq!(body["canSubmit"], true);

        let (status, body) = send(
            &app,
            json_request("POST", "/entries", json!({"date": "2024-06-01", "quantity": 2})),
        )
        .await;
        assert_eq!(status, StatusCode::CREATED);
        assert_eq!(body["recorded"]["date"], "2024-06-01");
        assert_eq!(body["next"]["date"], "2024-06-02");
        assert_eq!(body["next"]["state"], "noRecordForDate");

        let (_, body) = send(&app, get("/entries?date=2024-06-01")).await;
        assert_eq!(body["state"], "recordExists");
        assert_eq!(body["locked"], true);
        assert_eq!(decimal(&body["quantity"]), dec!(2));

        let (status, _) = send(
            &app,
            json_request("POST", "/entries", json!({"date": "2024-06-01", "quantity": 5})),
        )
        .await;
        assert_eq!(status, StatusCode::CONFLICT);
    }

    #[tokio::test]
    async fn test_entry_rejects_bad_input() {
        let app = app();
        send(&app, json_request("PUT", "/price", json!({"price": 60}))).await;

        let (status, _) = send(&app, get("/entries?date=2024-6-1")).await;
        assert_eq!(status, StatusCode::BAD_REQUEST);

        let (status, _) = send(
            &app,
            json_request("POST", "/entries", json!({"date": "2024-06-01", "quantity": -1})),
        )
        .await;
        assert_eq!(status, StatusCode::BAD_REQUEST);
    }

    #[tokio::test]
    async fn test_report_and_export() {
        let app = app();
        send(&app, json_request("PUT", "/price", json!({"price": 60}))).await;
        for (date, quantity) in [("2024-06-01", json!(2.0)), ("2024-06-02", json!(1.5))] {
            send(
                &app,
                json_request("POST", "/entries", json!({"date": date, "quantity": quantity})),
            )
            .await;
        }

        let (status, body) = send(&app, get("/reports?month=2024-06")).await;
        assert_eq!(status, StatusCode::OK);
        assert_eq!(body["sortBy"], "quantity");
        assert_eq!(body["sortOrder"], "desc");
        assert_eq!(body["rows"][0]["dateLabel"], "Sat Jun 01");
        assert_eq!(decimal(&body["totalQuantity"]), dec!(3.5));
        assert_eq!(decimal(&body["totalCost"]), dec!(210));

        let (_, body) = send(&app, get("/reports?month=2024-06&sortBy=date&sortOrder=desc")).await;
        assert_eq!(body["rows"][0]["date"], "2024-06-02");

        let response = app
            .clone()
            .oneshot(get("/reports/export?month=2024-06"))
            .await
            .unwrap();
        assert_eq!(response.status(), StatusCode::OK);
        assert_eq!(
            response.headers().get(header::CONTENT_DISPOSITION).unwrap(),
            "attachment; filename=\"milk_report_2024-06.xlsx\""
        );
    }

    #[tokio::test]
    async fn test_report_rejects_bad_month() {
        let app = app();
        let (status, body) = send(&app, get("/reports?month=2024-13")).await;
        assert_eq!(status, StatusCode::BAD_REQUEST);
        assert_eq!(body["action"], "Use the YYYY-MM format");

        let (status, _) = send(&app, get("/reports/export?month=2024-05")).await;
        assert_eq!(status, StatusCode::NOT_FOUND);
    }

    #[tokio::test]
    async fn test_oversized_amounts_rejected_and_report_still_served() {
        let app = app();

        let (status, _) = send(
            &app,
            json_request("PUT", "/price", json!({"price": "100000000000000000000"})),
        )
        .await;
        assert_eq!(status, StatusCode::BAD_REQUEST);

        let (status, _) = send(
            &app,
            json_request("PUT", "/price", json!({"price": "999999999999.99"})),
        )
        .await;
        assert_eq!(status, StatusCode::OK);

        let (status, _) = send(
            &app,
            json_request(
                "POST",
                "/entries",
                json!({"date": "2024-06-02", "quantity": "1000000000000"}),
            ),
        )
        .await;
        assert_eq!(status, StatusCode::BAD_REQUEST);

        for day in ["2024-06-01", "2024-06-30"] {
            let (status, _) = send(
                &app,
                json_request(
                    "POST",
                    "/entries",
                    json!({"date": day, "quantity": "999999999999.99"}),
                ),
            )
            .await;
            assert_eq!(status, StatusCode::CREATED);
        }

        let (status, body) = send(&app, get("/reports?month=2024-06")).await;
        assert_eq!(status, StatusCode::OK);
        assert_eq!(decimal(&body["totalQuantity"]), dec!(1999999999999.98));
        assert!(decimal(&body["totalCost"]) > Decimal::ZERO);

        let response = app
            .clone()
            .oneshot(get("/reports/export?month=2024-06"))
            .await
            .unwrap();
        assert_eq!(response.status(), StatusCode::OK);
    }
}

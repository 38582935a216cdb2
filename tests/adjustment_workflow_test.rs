use chrono::NaiveDate;
use rust_decimal::Decimal;
use rust_decimal_macros::dec;
use sea_orm::{ActiveModelTrait, Set};
use std::sync::Arc;
use tokio::sync::mpsc;

use stockdesk_api::{
    db::{establish_connection, run_migrations, DbPool},
    entities::{adjustment_reason, article, article_stock, branch, currency, terminal, user_config},
    errors::ServiceError,
    events::{Event, EventSender},
    models::{AdjustmentDraft, AdjustmentKind},
    services::{
        adjustments::{AdjustmentFilter, AdjustmentService},
        articles::{ArticleService, Resolution},
        configuration::ConfigurationService,
        numbering::NumberingService,
        stock::{summarize, ExistenceFilter, StockService},
    },
};

const USER_ID: i64 = 9;

struct TestEnv {
    db: Arc<DbPool>,
    adjustments: AdjustmentService,
    articles: ArticleService,
    stock: StockService,
    configuration: ConfigurationService,
    numbering: NumberingService,
    // Keeps the event channel open so post-commit sends succeed
    _event_rx: mpsc::Receiver<Event>,
    branch_id: i64,
    warehouse_id: i64,
    currency_id: i64,
    reason_id: i64,
}

async fn setup() -> TestEnv {
    let db = Arc::new(
        establish_connection("sqlite::memory:")
            .await
            .expect("Failed to open in-memory database"),
    );
    run_migrations(db.as_ref())
        .await
        .expect("Failed to run migrations");

    let (tx, rx) = mpsc::channel(100);
    let event_sender = Arc::new(EventSender::new(tx));

    let branch = branch::ActiveModel {
        code: Set("001".into()),
        name: Set("Central".into()),
        ..Default::default()
    }
    .insert(db.as_ref())
    .await
    .expect("Failed to create branch");

    let warehouse = stockdesk_api::entities::warehouse::ActiveModel {
        branch_id: Set(branch.id),
        code: Set("DEP-1".into()),
        name: Set("Main warehouse".into()),
        ..Default::default()
    }
    .insert(db.as_ref())
    .await
    .expect("Failed to create warehouse");

    let currency = currency::ActiveModel {
        code: Set("USD".into()),
        name: Set("US Dollar".into()),
        ..Default::default()
    }
    .insert(db.as_ref())
    .await
    .expect("Failed to create currency");

    let reason = adjustment_reason::ActiveModel {
        code: Set("COUNT".into()),
        description: Set("Physical count difference".into()),
        ..Default::default()
    }
    .insert(db.as_ref())
    .await
    .expect("Failed to create reason");

    let terminal = terminal::ActiveModel {
        code: Set("POS-1".into()),
        establishment_code: Set(1),
        point_code: Set(2),
        next_number: Set(42),
        ..Default::default()
    }
    .insert(db.as_ref())
    .await
    .expect("Failed to create terminal");

    user_config::ActiveModel {
        user_id: Set(USER_ID),
        terminal_id: Set(Some(terminal.id)),
        allow_positive: Set(true),
        allow_negative: Set(true),
        ..Default::default()
    }
    .insert(db.as_ref())
    .await
    .expect("Failed to create user config");

    TestEnv {
        adjustments: AdjustmentService::new(db.clone(), event_sender),
        articles: ArticleService::new(db.clone()),
        stock: StockService::new(db.clone()),
        configuration: ConfigurationService::new(db.clone()),
        numbering: NumberingService::new(db.clone()),
        db,
        _event_rx: rx,
        branch_id: branch.id,
        warehouse_id: warehouse.id,
        currency_id: currency.id,
        reason_id: reason.id,
    }
}

async fn seed_article(
    env: &TestEnv,
    code: &str,
    reference: Option<&str>,
    name: &str,
) -> article::Model {
    article::ActiveModel {
        code: Set(code.into()),
        reference_code: Set(reference.map(str::to_string)),
        name: Set(name.into()),
        line_id: Set(None),
        ..Default::default()
    }
    .insert(env.db.as_ref())
    .await
    .expect("Failed to create article")
}

async fn on_hand(env: &TestEnv, article_id: i64) -> Decimal {
    let filter = ExistenceFilter {
        warehouse_ids: vec![env.warehouse_id],
        article_id: Some(article_id),
        ..Default::default()
    };
    env.stock
        .query(&filter)
        .await
        .expect("Failed to query stock")
        .first()
        .map(|row| row.quantity)
        .unwrap_or(Decimal::ZERO)
}

fn base_draft(env: &TestEnv) -> AdjustmentDraft {
    let mut draft = AdjustmentDraft::new(NaiveDate::from_ymd_opt(2026, 8, 7).unwrap());
    draft.branch_id = env.branch_id;
    draft.warehouse_id = env.warehouse_id;
    draft.user_id = USER_ID;
    draft.currency_id = env.currency_id;
    draft.reason_id = env.reason_id;
    draft
}

#[tokio::test]
async fn full_workflow_posts_one_document_and_resets_the_draft() {
    let env = setup().await;
    let bolt = seed_article(&env, "ABC123", Some("REF-1"), "Hex bolt M8").await;
    seed_article(&env, "DEF456", None, "Washer ABC123 compatible").await;

    // Workflow entry: gate and numbering resolve before line entry
    let status = env.configuration.check(USER_ID).await.unwrap();
    assert!(status.has_config);
    assert!(status.has_terminal);

    let next = env.numbering.peek_next_number(USER_ID).await.unwrap();
    assert_eq!(next.number, 42);
    assert_eq!(next.formatted, "001-002-0000042");

    // Exact code match wins over the name-substring hit on the washer
    let article = match env.articles.resolve("ABC123").await.unwrap() {
        Resolution::Match { article } => article,
        other => panic!("expected exact match, got {:?}", other),
    };
    assert_eq!(article.id, bolt.id);

    let mut draft = base_draft(&env);
    draft.assign_number(next.number).unwrap();
    draft.add_line(article.id, dec!(5), dec!(10.50)).unwrap();
    assert_eq!(draft.total(), dec!(52.50));

    let detail = env.adjustments.create(draft.clone()).await.unwrap();
    assert_eq!(detail.header.document_number, 42);
    assert_eq!(detail.formatted_number, "001-002-0000042");
    assert_eq!(detail.header.total, dec!(52.50));
    assert_eq!(detail.lines.len(), 1);
    assert_eq!(detail.lines[0].item_number, 1);
    assert_eq!(detail.lines[0].line_total, dec!(52.50));

    // Positive adjustment created the stock row
    assert_eq!(on_hand(&env, bolt.id).await, dec!(5));

    // The terminal sequence advanced
    let after = env.numbering.peek_next_number(USER_ID).await.unwrap();
    assert_eq!(after.number, 43);

    // Post-submit cleanup leaves a blank draft ready for a new document
    draft.reset(NaiveDate::from_ymd_opt(2026, 8, 7).unwrap());
    assert!(draft.lines().is_empty());
    assert_eq!(draft.document_number(), None);
}

#[tokio::test]
async fn failed_submit_rolls_back_the_number_allocation() {
    let env = setup().await;
    let article = seed_article(&env, "GHI789", None, "Hex nut M8").await;

    // Nothing on hand, so a negative adjustment cannot post
    let mut draft = base_draft(&env);
    draft.kind = AdjustmentKind::Negative;
    draft.add_line(article.id, dec!(3), dec!(1)).unwrap();

    let err = env.adjustments.create(draft).await.unwrap_err();
    assert!(matches!(err, ServiceError::InsufficientStock(_)));
    assert_eq!(on_hand(&env, article.id).await, Decimal::ZERO);

    // The failed transaction rolled the allocation back; a retry cannot
    // produce a duplicate number
    let next = env.numbering.peek_next_number(USER_ID).await.unwrap();
    assert_eq!(next.number, 42);

    let mut retry = base_draft(&env);
    retry.add_line(article.id, dec!(3), dec!(1)).unwrap();
    let detail = env.adjustments.create(retry).await.unwrap();
    assert_eq!(detail.header.document_number, 42);
}

#[tokio::test]
async fn stale_displayed_number_is_overridden_by_the_allocation() {
    let env = setup().await;
    let article = seed_article(&env, "JKL012", None, "Wood screw").await;

    let mut draft = base_draft(&env);
    // Client kept a number from an earlier failed session
    draft.assign_number(7).unwrap();
    draft.add_line(article.id, dec!(1), dec!(2)).unwrap();

    let detail = env.adjustments.create(draft).await.unwrap();
    assert_eq!(detail.header.document_number, 42);
}

#[tokio::test]
async fn numbers_are_monotonic_per_terminal() {
    let env = setup().await;
    let article = seed_article(&env, "MNO345", None, "Flange").await;

    for expected in [42, 43, 44] {
        let mut draft = base_draft(&env);
        draft.add_line(article.id, dec!(1), dec!(1)).unwrap();
        let detail = env.adjustments.create(draft).await.unwrap();
        assert_eq!(detail.header.document_number, expected);
    }
}

#[tokio::test]
async fn gate_blocks_users_without_configuration_or_terminal() {
    let env = setup().await;
    let article = seed_article(&env, "PQR678", None, "Bearing").await;

    // Unknown user: no configuration at all
    let status = env.configuration.check(777).await.unwrap();
    assert!(!status.has_config);
    assert!(!status.has_terminal);

    let mut draft = base_draft(&env);
    draft.user_id = 777;
    draft.add_line(article.id, dec!(1), dec!(1)).unwrap();
    match env.adjustments.create(draft).await.unwrap_err() {
        ServiceError::Forbidden(msg) => {
            assert!(msg.contains("no system configuration"), "got: {}", msg)
        }
        other => panic!("expected forbidden, got {:?}", other),
    }

    // Configured user without a terminal
    user_config::ActiveModel {
        user_id: Set(13),
        terminal_id: Set(None),
        allow_positive: Set(true),
        allow_negative: Set(true),
        ..Default::default()
    }
    .insert(env.db.as_ref())
    .await
    .unwrap();

    let status = env.configuration.check(13).await.unwrap();
    assert!(status.has_config);
    assert!(!status.has_terminal);

    let mut draft = base_draft(&env);
    draft.user_id = 13;
    draft.add_line(article.id, dec!(1), dec!(1)).unwrap();
    match env.adjustments.create(draft).await.unwrap_err() {
        ServiceError::Forbidden(msg) => {
            assert!(msg.contains("no terminal assigned"), "got: {}", msg)
        }
        other => panic!("expected forbidden, got {:?}", other),
    }
}

#[tokio::test]
async fn disallowed_kind_is_rejected_by_the_gate() {
    let env = setup().await;
    let article = seed_article(&env, "STU901", None, "Gasket").await;

    let terminal = terminal::ActiveModel {
        code: Set("POS-2".into()),
        establishment_code: Set(1),
        point_code: Set(3),
        next_number: Set(1),
        ..Default::default()
    }
    .insert(env.db.as_ref())
    .await
    .unwrap();
    user_config::ActiveModel {
        user_id: Set(21),
        terminal_id: Set(Some(terminal.id)),
        allow_positive: Set(true),
        allow_negative: Set(false),
        ..Default::default()
    }
    .insert(env.db.as_ref())
    .await
    .unwrap();

    let mut draft = base_draft(&env);
    draft.user_id = 21;
    draft.kind = AdjustmentKind::Negative;
    draft.add_line(article.id, dec!(1), dec!(1)).unwrap();

    match env.adjustments.create(draft).await.unwrap_err() {
        ServiceError::Forbidden(msg) => {
            assert!(msg.contains("negative adjustments"), "got: {}", msg)
        }
        other => panic!("expected forbidden, got {:?}", other),
    }
}

#[tokio::test]
async fn reversal_undoes_the_stock_effect_and_deletes_the_document() {
    let env = setup().await;
    let article = seed_article(&env, "VWX234", None, "Coupling").await;

    let mut draft = base_draft(&env);
    draft.add_line(article.id, dec!(8), dec!(3.25)).unwrap();
    let detail = env.adjustments.create(draft).await.unwrap();
    assert_eq!(on_hand(&env, article.id).await, dec!(8));

    env.adjustments.reverse(detail.header.id).await.unwrap();
    assert_eq!(on_hand(&env, article.id).await, Decimal::ZERO);

    // The document is gone; reversing again reports not found
    assert!(matches!(
        env.adjustments.get(detail.header.id).await.unwrap_err(),
        ServiceError::NotFound(_)
    ));
    assert!(matches!(
        env.adjustments.reverse(detail.header.id).await.unwrap_err(),
        ServiceError::NotFound(_)
    ));
}

#[tokio::test]
async fn reversal_refuses_to_drive_stock_negative() {
    let env = setup().await;
    let article = seed_article(&env, "YZA567", None, "Valve").await;

    let mut draft = base_draft(&env);
    draft.add_line(article.id, dec!(5), dec!(1)).unwrap();
    let posted = env.adjustments.create(draft).await.unwrap();

    // Consume the stock the adjustment brought in
    let mut negative = base_draft(&env);
    negative.kind = AdjustmentKind::Negative;
    negative.add_line(article.id, dec!(5), dec!(1)).unwrap();
    env.adjustments.create(negative).await.unwrap();

    // Reversing the positive document would now go below zero
    let err = env.adjustments.reverse(posted.header.id).await.unwrap_err();
    assert!(matches!(err, ServiceError::InsufficientStock(_)));
    assert_eq!(on_hand(&env, article.id).await, Decimal::ZERO);
}

#[tokio::test]
async fn list_filters_by_date_and_branch_and_controls_detail() {
    let env = setup().await;
    let article = seed_article(&env, "BCD890", None, "Pulley").await;

    let mut early = base_draft(&env);
    early.document_date = NaiveDate::from_ymd_opt(2026, 7, 1).unwrap();
    early.add_line(article.id, dec!(1), dec!(1)).unwrap();
    env.adjustments.create(early).await.unwrap();

    let mut late = base_draft(&env);
    late.document_date = NaiveDate::from_ymd_opt(2026, 8, 1).unwrap();
    late.add_line(article.id, dec!(2), dec!(1)).unwrap();
    env.adjustments.create(late).await.unwrap();

    let filter = AdjustmentFilter {
        date_from: Some(NaiveDate::from_ymd_opt(2026, 7, 15).unwrap()),
        ..Default::default()
    };
    let results = env.adjustments.list(&filter).await.unwrap();
    assert_eq!(results.len(), 1);
    assert_eq!(
        results[0].header.document_date,
        NaiveDate::from_ymd_opt(2026, 8, 1).unwrap()
    );
    // Summary listing omits lines
    assert!(results[0].lines.is_empty());

    let detailed = AdjustmentFilter {
        detailed: true,
        ..Default::default()
    };
    let results = env.adjustments.list(&detailed).await.unwrap();
    assert_eq!(results.len(), 2);
    assert!(results.iter().all(|d| !d.lines.is_empty()));

    let other_branch = AdjustmentFilter {
        branch_id: Some(env.branch_id + 100),
        ..Default::default()
    };
    assert!(env.adjustments.list(&other_branch).await.unwrap().is_empty());
}

#[tokio::test]
async fn existence_query_aggregates_across_warehouses() {
    let env = setup().await;

    let quantities = [dec!(0), dec!(5), dec!(0), dec!(12)];
    for (i, quantity) in quantities.iter().enumerate() {
        let article = seed_article(
            &env,
            &format!("STK-{}", i),
            None,
            &format!("Stocked article {}", i),
        )
        .await;
        article_stock::ActiveModel {
            article_id: Set(article.id),
            warehouse_id: Set(env.warehouse_id),
            quantity: Set(*quantity),
            updated_at: Set(chrono::Utc::now()),
            ..Default::default()
        }
        .insert(env.db.as_ref())
        .await
        .expect("Failed to seed stock");
    }

    let filter = ExistenceFilter {
        warehouse_ids: vec![env.warehouse_id],
        ..Default::default()
    };
    let rows = env.stock.query(&filter).await.unwrap();
    let summary = summarize(&rows);
    assert_eq!(summary.total_articles, 4);
    assert_eq!(summary.total_existence, dec!(17));
    assert_eq!(summary.articles_without_stock, 2);

    // The backend excludes zero rows when asked; the summary never re-filters
    let with_stock_only = ExistenceFilter {
        warehouse_ids: vec![env.warehouse_id],
        only_with_stock: true,
        ..Default::default()
    };
    let rows = env.stock.query(&with_stock_only).await.unwrap();
    assert_eq!(rows.len(), 2);
    assert_eq!(summarize(&rows).articles_without_stock, 0);
}

use clause_audit::domain::model::{ClauseCategory, ObligationType, SimilarityBucket};
use clause_audit::{
    AuditConfig, AuditEngine, AuditError, AuditRecord, Collaborators, ContractPipeline,
    LocalStorage, RiskLevel, Settings,
};
use httpmock::prelude::*;
use std::path::{Path, PathBuf};
use tempfile::TempDir;

struct Workspace {
    _dir: TempDir,
    input: PathBuf,
    audit_dir: PathBuf,
}

fn workspace(contract: &str) -> anyhow::Result<Workspace> {
    let dir = TempDir::new()?;
    let input = dir.path().join("contract.txt");
    std::fs::write(&input, contract)?;
    let audit_dir = dir.path().join("audits");
    Ok(Workspace {
        _dir: dir,
        input,
        audit_dir,
    })
}

fn engine(
    ws: &Workspace,
    mut config: AuditConfig,
    services: Collaborators,
) -> AuditEngine<ContractPipeline<LocalStorage, Settings>> {
    let audit_dir = ws.audit_dir.to_string_lossy().to_string();
    config.output.audit_dir = audit_dir.clone();
    let settings = Settings::new(ws.input.to_string_lossy(), config);
    AuditEngine::new(ContractPipeline::new(
        LocalStorage::new(audit_dir),
        settings,
        services,
    ))
}

fn llm_config(endpoint: String) -> AuditConfig {
    let mut config = AuditConfig::default();
    config.llm.enabled = true;
    config.llm.endpoint = endpoint;
    config.llm.api_key = Some("test-key".to_string());
    config.llm.timeout_seconds = Some(5);
    config
}

fn saved_files(dir: &Path) -> Vec<String> {
    match std::fs::read_dir(dir) {
        Ok(entries) => entries
            .filter_map(|e| e.ok())
            .map(|e| e.file_name().to_string_lossy().to_string())
            .collect(),
        Err(_) => Vec::new(),
    }
}

#[tokio::test]
async fn employment_contract_end_to_end() -> anyhow::Result<()> {
    let ws = workspace(
        "1. The employee shall not engage in competing business.\n\
         2. This agreement is governed by Indian law.",
    )?;
    let mut config = AuditConfig::default();
    config.output.formats = vec!["json".to_string(), "csv".to_string()];

    let outcome = engine(&ws, config, Collaborators::offline()).run().await?;
    let record = &outcome.record;

    assert_eq!(record.language, "en");
    assert_eq!(record.clauses.len(), 2);
    assert_eq!(record.clauses[0].number.as_deref(), Some("1"));
    assert_eq!(record.clauses[0].obligation, ObligationType::Prohibition);
    assert_eq!(record.clauses[0].category, Some(ClauseCategory::NonCompete));
    assert_eq!(record.clauses[1].category, Some(ClauseCategory::Jurisdiction));
    assert_eq!(record.overall_risk, RiskLevel::Low);
    assert!(record.unfavorable_clauses.is_empty());
    assert!(!record.evaluation_scope.is_truncated());

    let saved: AuditRecord = serde_json::from_slice(&std::fs::read(&outcome.record_path)?)?;
    assert_eq!(&saved, record);

    let exports = ws.audit_dir.join("exports").join(record.audit_id.to_string());
    let csv = std::fs::read_to_string(exports.join("legal_audit_report.csv"))?;
    assert_eq!(csv.lines().count(), 3);
    assert!(csv.contains("Non-Compete"));
    assert!(exports.join("legal_audit_report.json").exists());
    Ok(())
}

#[tokio::test]
async fn unnumbered_document_is_one_clause() -> anyhow::Result<()> {
    let text = "This memorandum records the understanding between the parties.\n\
                Each party bears its own costs.";
    let ws = workspace(text)?;

    let record = engine(&ws, AuditConfig::default(), Collaborators::offline())
        .preview()
        .await?;

    assert_eq!(record.clauses.len(), 1);
    assert_eq!(record.clauses[0].number, None);
    assert_eq!(
        record.clauses[0].clause,
        "This memorandum records the understanding between the parties. Each party bears its own costs."
    );
    assert_eq!(record.contract_type, "Unknown / Other");
    assert!(saved_files(&ws.audit_dir).is_empty());
    Ok(())
}

#[tokio::test]
async fn high_risk_vendor_clause() -> anyhow::Result<()> {
    let ws = workspace(
        "1. The vendor shall indemnify the company and may terminate at any time at its sole discretion",
    )?;

    let outcome = engine(&ws, AuditConfig::default(), Collaborators::offline())
        .run()
        .await?;
    let clause = &outcome.record.clauses[0];

    assert_eq!(clause.risk, RiskLevel::High);
    assert_eq!(
        clause.risk_triggers,
        vec!["indemnify", "terminate at any time", "sole discretion"]
    );
    assert!(clause.ambiguous);
    assert_eq!(clause.ambiguity_terms, vec!["sole discretion"]);
    assert_eq!(clause.obligation, ObligationType::Obligation);
    assert_eq!(clause.category, Some(ClauseCategory::Termination));
    assert!(clause.similarity_flag.is_some());

    assert_eq!(outcome.record.contract_type, "Vendor Agreement");
    assert_eq!(outcome.record.unfavorable_clauses.len(), 1);
    assert_eq!(outcome.record.overall_risk, RiskLevel::Low);
    Ok(())
}

#[tokio::test]
async fn clause_cap_is_recorded_on_the_verdict() -> anyhow::Result<()> {
    let text = (1..=5)
        .map(|n| format!("{}. Payment is subject to penalty and lock-in.", n))
        .collect::<Vec<_>>()
        .join("\n");
    let ws = workspace(&text)?;
    let mut config = AuditConfig::default();
    config.analysis.max_clauses = 3;

    let outcome = engine(&ws, config, Collaborators::offline()).run().await?;
    let record = &outcome.record;

    assert_eq!(record.clauses.len(), 3);
    assert_eq!(record.evaluation_scope.segmented_clauses, 5);
    assert_eq!(record.evaluation_scope.evaluated_clauses, 3);
    assert_eq!(record.evaluation_scope.clause_cap, 3);
    assert_eq!(record.overall_risk, RiskLevel::High);
    Ok(())
}

#[tokio::test]
async fn bundled_exports_land_in_one_zip() -> anyhow::Result<()> {
    let ws = workspace("1. Rent is payable monthly.")?;
    let mut config = AuditConfig::default();
    config.output.formats = vec!["json".to_string(), "csv".to_string()];
    config.output.bundle = true;

    let outcome = engine(&ws, config, Collaborators::offline()).run().await?;

    let zip_path = ws
        .audit_dir
        .join("exports")
        .join(format!("{}.zip", outcome.record.audit_id));
    let mut archive = zip::ZipArchive::new(std::io::Cursor::new(std::fs::read(zip_path)?))?;
    let mut names: Vec<String> = (0..archive.len())
        .map(|i| archive.by_index(i).map(|f| f.name().to_string()))
        .collect::<Result<_, _>>()?;
    names.sort();

    assert_eq!(
        names,
        vec!["legal_audit_report.csv", "legal_audit_report.json"]
    );
    Ok(())
}

#[tokio::test]
async fn llm_summary_and_explanations() -> anyhow::Result<()> {
    let server = MockServer::start();
    let summary_mock = server.mock(|when, then| {
        when.method(POST)
            .path("/v1/chat/completions")
            .body_contains("Summarize this contract");
        then.status(200).json_body(serde_json::json!({
            "choices": [{"message": {"content": "An employment contract."}}]
        }));
    });
    let explain_mock = server.mock(|when, then| {
        when.method(POST)
            .path("/v1/chat/completions")
            .body_contains("Explain this clause");
        then.status(200).json_body(serde_json::json!({
            "choices": [{"message": {"content": "Plain-language explanation."}}]
        }));
    });

    let ws = workspace(
        "1. The employee shall not engage in competing business.\n\
         2. This agreement is governed by Indian law.",
    )?;
    let config = llm_config(server.url("/v1"));
    let services = Collaborators::from_config(&config)?;

    let outcome = engine(&ws, config, services).run().await?;

    summary_mock.assert_hits(1);
    explain_mock.assert_hits(2);
    assert_eq!(
        outcome.record.summary.as_deref(),
        Some("An employment contract.")
    );
    assert!(outcome
        .record
        .clauses
        .iter()
        .all(|c| c.explanation.as_deref() == Some("Plain-language explanation.")));
    Ok(())
}

#[tokio::test]
async fn hindi_document_is_translated_first() -> anyhow::Result<()> {
    let server = MockServer::start();
    let translate_mock = server.mock(|when, then| {
        when.method(POST)
            .path("/v1/chat/completions")
            .body_contains("Translate this legal document into English");
        then.status(200).json_body(serde_json::json!({
            "choices": [{"message": {"content":
                "1. The employee shall not engage in competing business.\n2. This agreement is governed by Indian law."
            }}]
        }));
    });

    let ws = workspace("कर्मचारी किसी प्रतिस्पर्धी व्यवसाय में शामिल नहीं होगा।")?;
    let mut config = llm_config(server.url("/v1"));
    config.llm.summarize = false;
    config.llm.explain_clauses = false;
    let services = Collaborators::from_config(&config)?;

    let outcome = engine(&ws, config, services).run().await?;

    translate_mock.assert();
    assert_eq!(outcome.record.language, "hi");
    assert_eq!(outcome.record.clauses.len(), 2);
    assert_eq!(
        outcome.record.clauses[0].category,
        Some(ClauseCategory::NonCompete)
    );
    Ok(())
}

#[tokio::test]
async fn service_failure_persists_nothing() -> anyhow::Result<()> {
    let server = MockServer::start();
    server.mock(|when, then| {
        when.method(POST).path("/v1/chat/completions");
        then.status(503).body("overloaded");
    });

    let ws = workspace("1. Either party may terminate this agreement with notice.")?;
    let config = llm_config(server.url("/v1"));
    let services = Collaborators::from_config(&config)?;

    let result = engine(&ws, config, services).run().await;

    let err = result.err().ok_or_else(|| anyhow::anyhow!("run should fail"))?;
    assert!(matches!(err, AuditError::ServiceError { .. }));
    assert!(saved_files(&ws.audit_dir).is_empty());
    Ok(())
}

#[tokio::test]
async fn embedding_backend_scores_templates() -> anyhow::Result<()> {
    let server = MockServer::start();
    let embeddings = server.mock(|when, then| {
        when.method(POST).path("/v1/embeddings");
        then.status(200).json_body(serde_json::json!({
            "data": [
                {"index": 0, "embedding": [1.0, 0.0]},
                {"index": 1, "embedding": [1.0, 0.0]}
            ]
        }));
    });

    let ws = workspace("1. Either party may terminate this agreement with 30 days notice.")?;
    let mut config = AuditConfig::default();
    config.similarity.backend = clause_audit::config::SimilarityBackend::Embedding;
    config.llm.endpoint = server.url("/v1");
    config.llm.api_key = Some("test-key".to_string());
    let services = Collaborators::from_config(&config)?;

    let outcome = engine(&ws, config, services).run().await?;
    let clause = &outcome.record.clauses[0];

    embeddings.assert();
    assert_eq!(clause.similarity_score, Some(1.0));
    assert_eq!(clause.similarity_flag, Some(SimilarityBucket::Aligned));
    assert_eq!(outcome.record.summary, None);
    Ok(())
}

#[test]
fn missing_api_key_is_reported_before_any_call() {
    let mut config = AuditConfig::default();
    config.llm.enabled = true;

    let err = Collaborators::from_config(&config).err();
    assert!(matches!(err, Some(AuditError::MissingConfigError { .. })));
}

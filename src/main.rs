use clap::Parser;
use clause_audit::utils::error::ErrorSeverity;
use clause_audit::utils::{logger, validation::Validate};
use clause_audit::{
    AuditEngine, AuditError, AuditRecord, CliConfig, Collaborators, ContractPipeline,
    LocalStorage, Settings,
};

#[tokio::main(flavor = "current_thread")]
async fn main() -> anyhow::Result<()> {
    let cli = CliConfig::parse();

    if cli.log_json {
        logger::init_json_logger(cli.verbose);
    } else {
        logger::init_cli_logger(cli.verbose);
    }

    tracing::info!("Starting clause-audit");
    if cli.verbose {
        tracing::debug!("CLI config: {:?}", cli);
    }

    let settings = match Settings::from_cli(&cli).and_then(|s| s.validate().map(|_| s)) {
        Ok(settings) => settings,
        Err(e) => {
            tracing::error!("❌ Configuration validation failed: {}", e);
            tracing::error!("💡 Suggestion: {}", e.recovery_suggestion());
            eprintln!("❌ {}", e.user_friendly_message());
            std::process::exit(1);
        }
    };

    let services = match Collaborators::from_config(&settings.config) {
        Ok(services) => services,
        Err(e) => fail(e),
    };

    let storage = LocalStorage::new(settings.config.output.audit_dir.clone());
    let engine = AuditEngine::new(ContractPipeline::new(storage, settings, services));

    if cli.dry_run {
        match engine.preview().await {
            Ok(record) => print_report(&record),
            Err(e) => fail(e),
        }
        return Ok(());
    }

    match engine.run().await {
        Ok(outcome) => {
            tracing::info!("✅ Audit completed successfully!");
            print_report(&outcome.record);
            println!("📁 Audit record saved to: {}", outcome.record_path);
        }
        Err(e) => fail(e),
    }

    Ok(())
}

fn fail(e: AuditError) -> ! {
    tracing::error!(
        "❌ Audit failed: {} (Category: {:?}, Severity: {:?})",
        e,
        e.category(),
        e.severity()
    );
    tracing::error!("💡 Recovery suggestion: {}", e.recovery_suggestion());

    eprintln!("❌ {}", e.user_friendly_message());
    eprintln!("💡 Suggestion: {}", e.recovery_suggestion());

    // Medium failures come from external services and are worth retrying.
    let exit_code = match e.severity() {
        ErrorSeverity::Low | ErrorSeverity::High => 1,
        ErrorSeverity::Medium => 2,
        ErrorSeverity::Critical => 3,
    };
    std::process::exit(exit_code);
}

fn print_report(record: &AuditRecord) {
    println!("📋 Contract Audit Report");
    println!("========================");
    println!("🆔 Audit ID: {}", record.audit_id);
    println!("🌐 Language: {}", record.language);
    println!("📄 Contract type: {}", record.contract_type);

    let entities = &record.entities;
    println!("👥 Parties: {}", join_or_dash(&entities.parties));
    println!("📅 Dates: {}", join_or_dash(&entities.dates));
    println!("💰 Amounts: {}", join_or_dash(&entities.amounts));
    println!("📍 Locations: {}", join_or_dash(&entities.locations));

    if let Some(summary) = &record.summary {
        println!();
        println!("📝 Summary:");
        println!("{}", summary);
    }

    println!();
    println!("🔎 Clauses:");
    for clause in &record.clauses {
        println!(
            "  [{}] {} risk, {} | {}",
            clause.number.as_deref().unwrap_or("-"),
            clause.risk,
            clause.obligation.as_str(),
            clause.clause
        );
        if clause.ambiguous {
            println!("      ⚠️ Ambiguous: {}", clause.ambiguity_terms.join(", "));
        }
        if let (Some(category), Some(score), Some(flag)) =
            (&clause.category, clause.similarity_score, &clause.similarity_flag)
        {
            println!("      📐 {} template: {:.2} ({})", category, score, flag.as_str());
        }
        if let Some(explanation) = &clause.explanation {
            println!("      💡 {}", explanation);
        }
    }

    println!();
    if record.unfavorable_clauses.is_empty() {
        println!("✅ No clauses need attention");
    } else {
        println!("🚩 Clauses needing attention:");
        for item in &record.unfavorable_clauses {
            println!(
                "  [{}] {} risk: {}",
                item.number.as_deref().unwrap_or("-"),
                item.risk,
                item.triggers.join(", ")
            );
        }
    }

    println!("⚖️ Overall contract risk: {}", record.overall_risk);

    let scope = &record.evaluation_scope;
    if scope.is_truncated() {
        println!(
            "ℹ️ Only the first {} of {} clauses were evaluated",
            scope.evaluated_clauses, scope.segmented_clauses
        );
    }
}

fn join_or_dash(items: &[String]) -> String {
    if items.is_empty() {
        "-".to_string()
    } else {
        items.join(", ")
    }
}

use crate::infra::{parse_date, parse_decimal, start_of_day};
use chrono::{Local, NaiveDate};
use clap::Args;
use claims_review::config::AppConfig;
use claims_review::error::AppError;
use claims_review::workflows::claims::{ClaimEvaluator, ClaimSnapshot, EvaluationResult};
use rust_decimal::Decimal;

#[derive(Args, Debug)]
pub(crate) struct EvaluateArgs {
    /// Hours worked in the billing period
    #[arg(long, value_parser = parse_decimal)]
    pub(crate) hours: Decimal,
    /// Hourly rate in rand
    #[arg(long, value_parser = parse_decimal)]
    pub(crate) rate: Decimal,
    /// Treat the claim as having a supporting document attached
    #[arg(long)]
    pub(crate) has_document: bool,
    /// Length of the justification notes in UTF-16 code units
    #[arg(long, default_value_t = 0)]
    pub(crate) notes_length: usize,
    /// Submission date (YYYY-MM-DD, defaults to the evaluation date)
    #[arg(long, value_parser = parse_date)]
    pub(crate) submitted: Option<NaiveDate>,
    /// Evaluation date (YYYY-MM-DD, defaults to today)
    #[arg(long, value_parser = parse_date)]
    pub(crate) today: Option<NaiveDate>,
}

pub(crate) fn run_evaluate(args: EvaluateArgs) -> Result<(), AppError> {
    let config = AppConfig::load()?;
    let evaluator = ClaimEvaluator::new(config.evaluation);

    let snapshot = snapshot_from_args(&args)?;
    let result = evaluator.evaluate(&snapshot);

    render_evaluation(&snapshot, &result);
    Ok(())
}

fn snapshot_from_args(args: &EvaluateArgs) -> Result<ClaimSnapshot, AppError> {
    let today = args.today.unwrap_or_else(|| Local::now().date_naive());
    let submitted = args.submitted.unwrap_or(today);
    if submitted > today {
        return Err(AppError::InvalidInput(format!(
            "submission date {submitted} is after evaluation date {today}"
        )));
    }

    Ok(ClaimSnapshot {
        hours_worked: args.hours,
        hourly_rate: args.rate,
        has_document: args.has_document,
        notes_length: args.notes_length,
        submitted_at: start_of_day(submitted),
        now: start_of_day(today),
    })
}

fn render_evaluation(snapshot: &ClaimSnapshot, result: &EvaluationResult) {
    let level = result.risk_level();

    println!("Claim evaluation");
    println!(
        "  {} hours at R{} per hour = R{}",
        snapshot.hours_worked.normalize(),
        snapshot.hourly_rate.normalize(),
        snapshot.total_amount().normalize()
    );
    println!(
        "  Submitted {} ({} day(s) ago)",
        snapshot.submitted_at.date_naive(),
        snapshot.days_since_submission()
    );
    println!("  Valid: {}", if result.is_valid() { "yes" } else { "no" });
    println!(
        "  Manager approval required: {}",
        if result.requires_manager_approval() {
            "yes"
        } else {
            "no"
        }
    );
    println!(
        "  Auto-approval eligible: {}",
        if result.auto_approval_eligible() {
            "yes"
        } else {
            "no"
        }
    );
    println!(
        "  Risk: {} ({}/100, {})",
        level.label(),
        result.risk_score(),
        level.color()
    );

    if result.errors().is_empty() {
        println!("\nErrors: none");
    } else {
        println!("\nErrors");
        for error in result.errors() {
            println!("- {}", error);
        }
    }

    if result.warnings().is_empty() {
        println!("\nWarnings: none");
    } else {
        println!("\nWarnings");
        for warning in result.warnings() {
            println!("- {}", warning);
        }
    }
}

use crate::infra::{parse_indicator_json, visit_timestamp, InMemoryEvaluationRepository};
use chrono::{Duration, Local, NaiveDate, Utc};
use clap::Args;
use std::fs::File;
use std::path::{Path, PathBuf};
use std::sync::Arc;
use trichoscalp::analysis::{
    AnalysisResult, AnalysisService, Comparator, ComparisonOutcome, EvaluationId,
    IndicatorSynthesizer, PriorEvaluation, RandomNoise, SubjectId, SynthesisRequest,
};
use trichoscalp::error::AppError;
use trichoscalp::report::{references, EvolutionReport};

#[derive(Args, Debug)]
pub(crate) struct AnalyzeArgs {
    /// Client the evaluation belongs to
    #[arg(long)]
    pub(crate) subject: String,
    /// Image reference; repeat once per capture, standardized grid first
    #[arg(long = "image", required = true)]
    pub(crate) images: Vec<String>,
    /// Indicators of the previous evaluation as a JSON object
    #[arg(long)]
    pub(crate) prior: Option<String>,
    /// Date of the previous evaluation (YYYY-MM-DD). Defaults to 30 days ago.
    #[arg(long, value_parser = crate::infra::parse_date)]
    pub(crate) prior_date: Option<NaiveDate>,
    /// Seed the indicator noise for reproducible output
    #[arg(long)]
    pub(crate) seed: Option<u64>,
}

#[derive(Args, Debug)]
pub(crate) struct CompareArgs {
    /// Current indicators as a JSON object
    #[arg(long)]
    pub(crate) current: String,
    /// Previous indicators as a JSON object
    #[arg(long)]
    pub(crate) previous: String,
    /// Days between the two evaluations
    #[arg(long)]
    pub(crate) days: Option<i64>,
    /// Write the per-indicator table to this CSV file
    #[arg(long)]
    pub(crate) csv: Option<PathBuf>,
}

#[derive(Args, Debug)]
pub(crate) struct DemoArgs {
    /// Noise seed for the simulated visits
    #[arg(long, default_value_t = 7)]
    pub(crate) seed: u64,
    /// Date of the first visit (YYYY-MM-DD). Defaults to 60 days before today.
    #[arg(long, value_parser = crate::infra::parse_date)]
    pub(crate) start: Option<NaiveDate>,
    /// Write the final evolution table to this CSV file
    #[arg(long)]
    pub(crate) csv: Option<PathBuf>,
    /// Print the literature citations after the report
    #[arg(long)]
    pub(crate) references: bool,
}

pub(crate) fn run_analyze(args: AnalyzeArgs) -> Result<(), AppError> {
    let AnalyzeArgs {
        subject,
        images,
        prior,
        prior_date,
        seed,
    } = args;

    let prior = match prior {
        Some(raw) => {
            let created_at = match prior_date {
                Some(date) => visit_timestamp(date)?,
                None => Utc::now() - Duration::days(30),
            };
            Some(PriorEvaluation {
                evaluation_id: EvaluationId("cli-prior".to_string()),
                created_at,
                indicators: parse_indicator_json(&raw, "prior")?,
            })
        }
        None => None,
    };

    let mut noise = match seed {
        Some(seed) => RandomNoise::seeded(seed),
        None => RandomNoise::from_entropy(),
    };
    let result = IndicatorSynthesizer::default().synthesize(
        SynthesisRequest {
            subject_id: SubjectId(subject),
            evaluation_id: EvaluationId("cli-evaluation".to_string()),
            image_urls: images,
            prior,
            evaluated_at: None,
        },
        &mut noise,
    );

    let rendered = serde_json::to_string_pretty(&result)
        .map_err(|err| AppError::Input(format!("cannot render analysis ({err})")))?;
    println!("{rendered}");
    Ok(())
}

pub(crate) fn run_compare(args: CompareArgs) -> Result<(), AppError> {
    let current = parse_indicator_json(&args.current, "current")?;
    let previous = parse_indicator_json(&args.previous, "previous")?;

    let comparator = Comparator::default();
    let outcome = comparator
        .compare(&current, &previous)?
        .with_interval(args.days.unwrap_or(0));

    println!("{}", comparator.executive_summary(&outcome));
    render_table(&outcome, args.csv.as_deref())
}

pub(crate) fn run_demo(args: DemoArgs) -> Result<(), AppError> {
    let DemoArgs {
        seed,
        start,
        csv,
        references: print_references,
    } = args;

    let start = start.unwrap_or_else(|| Local::now().date_naive() - Duration::days(60));
    let service = AnalysisService::new(
        Arc::new(InMemoryEvaluationRepository::default()),
        IndicatorSynthesizer::default(),
        Box::new(RandomNoise::seeded(seed)),
    );
    let subject = SubjectId("demo-client".to_string());

    println!("TrichoScalp evaluation demo (seed {seed})");
    for (visit, (offset, captures)) in [(0, 5), (30, 10), (60, 14)].into_iter().enumerate() {
        let date = start + Duration::days(offset);
        let record = service.register(subject.clone(), Some(visit_timestamp(date)?))?;
        let images = (1..=captures)
            .map(|index| format!("demo/{}/visit-{}/capture-{index:02}.jpg", subject, visit + 1))
            .collect();
        let result = service.analyze(&record.evaluation_id, images)?;
        render_visit(visit + 1, date, &result);
    }

    match service.evolution(&subject)?.outcome() {
        Some(outcome) => {
            println!("\n{}", service.synthesizer().comparator().executive_summary(outcome));
            render_table(outcome, csv.as_deref())?;
        }
        None => println!("\nNot enough analysed visits for an evolution report."),
    }

    if print_references {
        println!("\nReferências");
        println!("{}", references::citation_list());
    }

    Ok(())
}

fn render_visit(visit: usize, date: NaiveDate, result: &AnalysisResult) {
    let indicators = &result.quantitative_indicators;
    println!(
        "\nVisit {visit} ({date}) score {:.1}/10, confidence {:.2}",
        result.interpretation.global_score, result.interpretation.confidence
    );
    println!("  {}", result.qualitative_analysis.summary);
    for (indicator, value) in indicators.iter() {
        println!("  - {:<18} {value:.2}", indicator.label());
    }
}

fn render_table(outcome: &ComparisonOutcome, csv: Option<&Path>) -> Result<(), AppError> {
    let report = EvolutionReport::from_outcome(outcome);

    println!(
        "\n{:<18} {:>8} {:>8} {:>8} {:>9}  direction",
        "indicator", "previous", "current", "delta", "relative"
    );
    for row in &report.rows {
        println!(
            "{:<18} {:>8.2} {:>8.2} {:>8} {:>8.1}%  {}",
            row.label, row.previous, row.current, row.delta, row.relative_percent, row.direction_label
        );
    }
    println!(
        "Interval: {} days, evolution score {:.2}",
        report.days_between_evaluations, report.evolution_score
    );

    if let Some(path) = csv {
        let file = File::create(path)?;
        report.write_csv(file)?;
        println!("Evolution table written to {}", path.display());
    }

    Ok(())
}

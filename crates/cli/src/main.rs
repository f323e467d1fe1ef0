use std::path::PathBuf;

use clap::{Parser, Subcommand};
use lifeguard_core::{resolve_kb_dir, similarity, CoreConfig, TriageService};
use lifeguard_kb::KnowledgeBase;

#[derive(Parser)]
#[command(name = "lifeguard")]
#[command(about = "Lifeguard symptom triage CLI")]
struct Cli {
    #[command(subcommand)]
    command: Option<Commands>,
}

#[derive(Subcommand)]
enum Commands {
    /// Train the classifier from a labelled dataset and write the artifact
    Train {
        /// Dataset YAML file: a list of {disease, symptoms} cases
        #[arg(long, default_value = "data/training.yaml")]
        dataset: PathBuf,
        /// Output path for the model artifact
        #[arg(long, default_value = "model.json")]
        out: PathBuf,
    },
    /// Score a set of symptoms locally and print the result as JSON
    Assist {
        /// Explicit symptom name (repeatable)
        #[arg(long = "symptom")]
        symptoms: Vec<String>,
        /// Free-text symptom description
        #[arg(long)]
        text: Option<String>,
        /// Model artifact path
        #[arg(long, default_value = "model.json")]
        model: PathBuf,
        /// Knowledge-base directory override
        #[arg(long)]
        kb_dir: Option<PathBuf>,
    },
    /// Print diseases with symptom profiles similar to the given disease
    Similar {
        /// Disease label as it appears in the disease-symptoms table
        disease: String,
        /// Knowledge-base directory override
        #[arg(long)]
        kb_dir: Option<PathBuf>,
    },
}

fn main() -> Result<(), Box<dyn std::error::Error>> {
    let cli = Cli::parse();

    match cli.command {
        Some(Commands::Train { dataset, out }) => {
            let cases = lifeguard_model::load_dataset(&dataset)?;
            let classifier = lifeguard_model::fit(&cases)?;
            classifier.save(&out)?;
            println!(
                "Trained {} classes over {} symptoms from {} cases, wrote {}",
                classifier.classes().len(),
                classifier.vocabulary().len(),
                cases.len(),
                out.display()
            );
        }
        Some(Commands::Assist {
            symptoms,
            text,
            model,
            kb_dir,
        }) => {
            let kb_dir = resolve_kb_dir(kb_dir)?;
            let cfg = CoreConfig::new(model, kb_dir)?;
            let service = TriageService::from_config(&cfg)?;

            let explicit = (!symptoms.is_empty()).then_some(symptoms.as_slice());
            let result = service.assist(explicit, text.as_deref())?;
            println!("{}", serde_json::to_string_pretty(&result)?);
        }
        Some(Commands::Similar { disease, kb_dir }) => {
            let kb_dir = resolve_kb_dir(kb_dir)?;
            let kb = KnowledgeBase::load(&kb_dir)?;

            let similar = similarity::similar_diseases(&disease, &kb.profiles);
            if similar.is_empty() {
                println!("No similar diseases found for {disease}.");
            } else {
                for other in similar {
                    println!("{other}");
                }
            }
        }
        None => {
            println!("Use 'lifeguard --help' for commands");
        }
    }

    Ok(())
}

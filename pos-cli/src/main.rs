//! Interface de linha de comando do etiquetador POS: treina um modelo HMM a
//! partir de um par de arquivos paralelos (ou do corpus de demonstração
//! embutido) e oferece consulta interativa, etiquetagem avulsa e avaliação
//! em lote.

use std::io::{self, BufRead, Write};
use std::path::PathBuf;

use anyhow::{bail, Context, Result};
use clap::{Parser, Subcommand};
use tracing::info;

use pos_core::corpus;
use pos_core::hmm::HmmTrainer;
use pos_core::model::HmmModel;
use pos_core::tokenizer::tokenize;
use pos_core::viterbi::DEFAULT_UNSEEN_PENALTY;

#[derive(Parser)]
#[command(
    name = "pos-cli",
    version,
    about = "Etiquetador morfossintático (HMM bigrama + Viterbi)"
)]
struct Cli {
    /// Arquivo de sentenças de treinamento (uma sentença por linha)
    #[arg(long, global = true)]
    train_sentences: Option<PathBuf>,

    /// Arquivo de tags de treinamento (paralelo ao de sentenças)
    #[arg(long, global = true)]
    train_tags: Option<PathBuf>,

    /// Penalidade (log-space) para palavra nunca vista sob a tag candidata
    #[arg(long, global = true, default_value_t = DEFAULT_UNSEEN_PENALTY)]
    penalty: f64,

    #[command(subcommand)]
    command: Command,
}

#[derive(Subcommand)]
enum Command {
    /// Loop interativo: digite uma sentença por linha; "q" encerra
    Repl,

    /// Etiqueta uma única sentença passada como argumento
    Tag {
        /// A sentença (as palavras podem vir soltas ou entre aspas)
        sentence: Vec<String>,
    },

    /// Avalia o modelo em um par de arquivos de teste
    Eval {
        /// Arquivo de sentenças de teste
        #[arg(long)]
        test_sentences: PathBuf,

        /// Arquivo de tags-ouro de teste
        #[arg(long)]
        test_tags: PathBuf,

        /// Emite o relatório como JSON em vez de texto
        #[arg(long)]
        json: bool,
    },
}

fn main() -> Result<()> {
    tracing_subscriber::fmt()
        .with_env_filter(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| "info".into()),
        )
        .init();

    let cli = Cli::parse();
    let model = train_model(&cli)?;

    match &cli.command {
        Command::Repl => run_repl(&model, cli.penalty),
        Command::Tag { sentence } => run_tag(&model, cli.penalty, &sentence.join(" ")),
        Command::Eval {
            test_sentences,
            test_tags,
            json,
        } => run_eval(&model, cli.penalty, test_sentences, test_tags, *json),
    }
}

/// Treina o modelo com os arquivos indicados, ou com o corpus de
/// demonstração embutido quando nenhum par foi passado.
fn train_model(cli: &Cli) -> Result<HmmModel> {
    let (sentences, tags) = match (&cli.train_sentences, &cli.train_tags) {
        (Some(sentences_path), Some(tags_path)) => {
            info!(
                "Treinando com {} + {}",
                sentences_path.display(),
                tags_path.display()
            );
            corpus::load_parallel_files(sentences_path, tags_path)
                .with_context(|| "falha ao ler o corpus de treinamento")?
        }
        (None, None) => {
            info!("Sem corpus externo; usando o corpus de demonstração embutido");
            corpus::demo_training_pairs()
        }
        _ => bail!("--train-sentences e --train-tags devem ser usados juntos"),
    };

    let model = HmmTrainer::train(&sentences, &tags)?;
    info!(
        "Modelo treinado: {} estados de origem na tabela de transição",
        model.transitions.len()
    );
    Ok(model)
}

/// Loop iterativo lê-decodifica-imprime; "q" (ou EOF) encerra.
fn run_repl(model: &HmmModel, penalty: f64) -> Result<()> {
    let stdin = io::stdin();
    let mut stdout = io::stdout();

    loop {
        print!("viterbi> ");
        stdout.flush()?;

        let mut line = String::new();
        if stdin.lock().read_line(&mut line)? == 0 {
            break;
        }
        let line = line.trim();
        if line == "q" {
            break;
        }

        let tokens = tokenize(line);
        if tokens.is_empty() {
            // Linha vazia (ou só pontuação): zero tags, não é erro
            println!();
            continue;
        }

        match model.decode_with_penalty(&tokens, penalty) {
            Ok(result) => println!("{}", result.tags.join(" ")),
            Err(err) => eprintln!("erro: {err}"),
        }
    }

    Ok(())
}

fn run_tag(model: &HmmModel, penalty: f64, sentence: &str) -> Result<()> {
    let tokens = tokenize(sentence);
    if tokens.is_empty() {
        println!();
        return Ok(());
    }

    let result = model.decode_with_penalty(&tokens, penalty)?;
    println!("{}", result.tags.join(" "));
    Ok(())
}

fn run_eval(
    model: &HmmModel,
    penalty: f64,
    test_sentences: &PathBuf,
    test_tags: &PathBuf,
    json: bool,
) -> Result<()> {
    let (sentences, gold) = corpus::load_parallel_files(test_sentences, test_tags)
        .with_context(|| "falha ao ler o corpus de teste")?;

    let report = pos_core::evaluate_corpus(model, &sentences, &gold, penalty)?;

    if json {
        println!("{}", serde_json::to_string_pretty(&report)?);
    } else {
        println!("Tags corretas:   {}", report.correct);
        println!("Tags incorretas: {}", report.incorrect);
        if report.unmatched > 0 {
            println!("Posições sem par: {}", report.unmatched);
        }
        println!("Acurácia: {:.2}%", report.accuracy() * 100.0);
    }

    Ok(())
}

//! Command implementations for the semret CLI.

use std::fs::{self, File};
use std::io::BufWriter;
use std::path::{Path, PathBuf};
use std::sync::Arc;
use std::time::Instant;

use anyhow::Context;
use chrono::Local;
use log::{error, info};

use crate::analysis::StopWords;
use crate::cli::args::*;
use crate::cli::output::*;
use crate::corpus::{CorpusIndex, CorpusLoader, DirectoryLoader, JsonlLoader};
use crate::embedding::{Embedder, HashingEmbedder, embed_corpus};
use crate::error::{Result, SemretError};
use crate::hybrid::{HybridSearchEngine, SearchConfig};
use crate::lexical::LexicalModel;
use crate::report::{ResultSink, SearchReport, TextSink, report_file_name};

/// Execute a CLI command.
pub fn execute_command(args: SemretArgs) -> Result<()> {
    match &args.command {
        Command::Search(search_args) => search(search_args, &args),
        Command::Batch(batch_args) => batch(batch_args, &args),
        Command::Terms(terms_args) => terms(terms_args, &args),
    }
}

/// Load the corpus selected by `--jsonl` or `--folder`.
pub fn load_corpus(args: &CorpusArgs) -> Result<CorpusIndex> {
    let documents = if let Some(path) = &args.jsonl {
        info!("Loading corpus from {}", path.display());
        JsonlLoader::new(path).load()?
    } else if let Some(folder) = &args.folder {
        info!("Loading corpus from {}", folder.display());
        DirectoryLoader::new(folder)
            .with_extension(args.extension.as_str())
            .load()?
    } else {
        return Err(SemretError::configuration(
            "no corpus given: use --folder, --jsonl or set SEMRET_DOCS",
        ));
    };

    CorpusIndex::new(documents)
}

fn stop_words(arg: StopWordsArg) -> StopWords {
    match arg {
        StopWordsArg::None => StopWords::None,
        StopWordsArg::English => StopWords::English,
    }
}

fn base_config(path: Option<&PathBuf>) -> Result<SearchConfig> {
    match path {
        Some(path) => {
            info!("Loading configuration from {}", path.display());
            SearchConfig::from_file(path)
        }
        None => Ok(SearchConfig::default()),
    }
}

/// Build the search configuration: config file first, then flag overrides.
pub fn build_config(args: &RankingArgs) -> Result<SearchConfig> {
    let mut config = base_config(args.config.as_ref())?;

    if let Some(weight) = args.lexical_weight {
        config.weights.lexical_weight = weight;
    }
    if let Some(weight) = args.semantic_weight {
        config.weights.semantic_weight = weight;
    }
    if args.top_k.is_some() {
        config.top_k = args.top_k;
    }
    if let Some(dimension) = args.dimension {
        config.embedding.dimension = dimension;
    }
    if let Some(list) = args.stop_words {
        config.lexical.analyzer.stop_words = stop_words(list);
    }

    config.validate()?;
    Ok(config)
}

/// Embed the corpus unless disabled, then fit the engine.
pub fn build_engine(
    corpus: CorpusIndex,
    config: SearchConfig,
    no_embeddings: bool,
) -> Result<HybridSearchEngine> {
    if no_embeddings {
        info!("Embeddings disabled, ranking on the lexical signal");
        return HybridSearchEngine::new(Arc::new(corpus), config, None);
    }

    let embedder = HashingEmbedder::new(config.embedding.clone())?;
    let start = Instant::now();
    let corpus = embed_corpus(corpus, &embedder)?;
    info!(
        "Embedded {}/{} documents in {:?}",
        corpus.embedded_count(),
        corpus.len(),
        start.elapsed()
    );

    let embedder: Arc<dyn Embedder> = Arc::new(embedder);
    HybridSearchEngine::new(Arc::new(corpus), config, Some(embedder))
}

fn search(args: &SearchArgs, cli_args: &SemretArgs) -> Result<()> {
    let config = build_config(&args.ranking)?;
    let corpus = load_corpus(&args.corpus)?;
    info!("Loaded {} documents", corpus.len());
    let weights = config.weights;
    let engine = build_engine(corpus, config, args.ranking.no_embeddings)?;

    let result = engine.search(&args.query)?;
    let mut report = SearchReport::new(&args.query, &result, engine.corpus(), weights);
    if args.keyword_stats {
        report = report.with_keyword_stats(engine.corpus());
    }

    output_report(&report, cli_args)?;

    if args.save_report {
        let path = PathBuf::from(report_file_name(&Local::now()));
        let file = File::create(&path)
            .with_context(|| format!("cannot create report file {}", path.display()))?;
        let mut sink = TextSink::new(BufWriter::new(file));
        sink.write(&report)?;
        output_message(
            &format!("Results have been saved in file: {}", path.display()),
            cli_args,
        );
    }

    Ok(())
}

fn read_queries(path: &Path) -> Result<Vec<String>> {
    let content = fs::read_to_string(path)
        .with_context(|| format!("cannot read queries file {}", path.display()))?;
    Ok(content
        .lines()
        .map(str::trim)
        .filter(|line| !line.is_empty())
        .map(str::to_string)
        .collect())
}

fn batch(args: &BatchArgs, cli_args: &SemretArgs) -> Result<()> {
    let config = build_config(&args.ranking)?;
    let queries = read_queries(&args.queries)?;
    let corpus = load_corpus(&args.corpus)?;
    let weights = config.weights;
    let engine = build_engine(corpus, config, args.ranking.no_embeddings)?;

    let threads = args.threads.unwrap_or_else(num_cpus::get).max(1);
    let pool = rayon::ThreadPoolBuilder::new()
        .num_threads(threads)
        .build()
        .map_err(|e| SemretError::other(format!("failed to start thread pool: {e}")))?;

    let start = Instant::now();
    let results = pool.install(|| engine.search_batch(&queries));
    info!(
        "Ranked {} queries on {threads} threads in {:?}",
        queries.len(),
        start.elapsed()
    );

    let mut failed = 0;
    for (query, result) in queries.iter().zip(results) {
        match result {
            Ok(result) => {
                let report = SearchReport::new(query, &result, engine.corpus(), weights);
                output_report(&report, cli_args)?;
            }
            Err(e) => {
                failed += 1;
                error!("Query {query:?} failed: {e}");
            }
        }
    }

    if failed > 0 {
        return Err(SemretError::other(format!(
            "{failed} of {} queries failed",
            queries.len()
        )));
    }
    Ok(())
}

fn terms(args: &TermsArgs, cli_args: &SemretArgs) -> Result<()> {
    let mut config = base_config(args.config.as_ref())?;
    if let Some(list) = args.stop_words {
        config.lexical.analyzer.stop_words = stop_words(list);
    }

    let corpus = load_corpus(&args.corpus)?;
    let model = LexicalModel::fit(&corpus, &config.lexical)?;

    let summary = TermsSummary {
        documents: model.document_count(),
        vocabulary_size: model.vocabulary_size(),
        terms: model
            .top_terms(args.limit)
            .into_iter()
            .map(|(term, weight)| TermWeight { term, weight })
            .collect(),
    };
    output_terms(&summary, cli_args)
}

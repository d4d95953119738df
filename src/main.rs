use std::fmt::{Display, Formatter};
use std::path::PathBuf;

use anyhow::{bail, Context, Result};
use clap::{Parser, Subcommand, ValueEnum};
use spdlog::warn;

use postdex::config::{load_config, Config};
use postdex::logger::configure_logger;
use postdex::paginator::Paginator;
use postdex::pipeline;
use postdex::post_index::{load_body, PostIndex};
use postdex::scaffold::{scaffold_post, NewPost};
use postdex::search::{self, SortMode};
use postdex::taxonomy::derive_taxonomy;

#[derive(Parser, Debug)]
#[command(version, about, long_about = None)]
struct Args {
    /// Config path. When absent, postdex.toml is searched for
    #[arg(long)]
    config: Option<PathBuf>,

    #[command(subcommand)]
    command: Command,
}

#[derive(Subcommand, Debug)]
enum Command {
    /// Scan the posts directory and write the index artifact
    Build {
        /// Posts directory, overriding the configuration
        #[arg(long)]
        posts_dir: Option<PathBuf>,

        /// Index file to write, overriding the configuration
        #[arg(long)]
        output: Option<PathBuf>,
    },
    /// Create a new post file with its front matter filled in
    New {
        /// Title of the post
        #[arg(short, long)]
        title: String,

        /// Category directory the post goes under
        #[arg(short, long)]
        category: String,

        /// Optional subcategory directory
        #[arg(short, long)]
        subcategory: Option<String>,

        /// Name of the author. If empty, OS user real name is being used
        #[arg(short, long)]
        author: Option<String>,
    },
    /// List indexed posts
    List {
        /// Keep only posts whose title, author or category contains this
        #[arg(short, long, default_value = "")]
        query: String,

        #[arg(short, long, value_enum, default_value_t = SortArg::Newest)]
        sort: SortArg,

        /// Page to show, starting at 1
        #[arg(short, long, default_value_t = 1)]
        page: u32,
    },
    /// Print one post's body
    Show {
        category: String,
        slug: String,

        /// Needed only when posts share a category and slug across
        /// subcategories
        #[arg(short, long)]
        subcategory: Option<String>,
    },
    /// Print every category with its subcategories
    Categories,
}

#[derive(Clone, Copy, Debug, ValueEnum)]
enum SortArg {
    Newest,
    Oldest,
    Title,
}

// clap renders the default through Display, so this has to round-trip
// with the ValueEnum names.
impl Display for SortArg {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        let name = match self {
            SortArg::Newest => "newest",
            SortArg::Oldest => "oldest",
            SortArg::Title => "title",
        };
        write!(f, "{}", name)
    }
}

impl From<SortArg> for SortMode {
    fn from(value: SortArg) -> Self {
        match value {
            SortArg::Newest => SortMode::Newest,
            SortArg::Oldest => SortMode::Oldest,
            SortArg::Title => SortMode::Title,
        }
    }
}

#[tokio::main]
async fn main() -> Result<()> {
    let args = Args::parse();

    let config = load_config(args.config).context("could not load configuration")?;
    if let Err(err) = configure_logger(&config) {
        warn!("Error creating logger sinks. Using console instead. Desc={}", err);
    }

    match args.command {
        Command::Build { posts_dir, output } => build(config, posts_dir, output),
        Command::New {
            title,
            category,
            subcategory,
            author,
        } => new_post(&config, title, category, subcategory, author),
        Command::List { query, sort, page } => list(&config, &query, sort, page).await,
        Command::Show {
            category,
            slug,
            subcategory,
        } => show(&config, &category, subcategory.as_deref(), &slug).await,
        Command::Categories => categories(&config).await,
    }
}

fn build(mut config: Config, posts_dir: Option<PathBuf>, output: Option<PathBuf>) -> Result<()> {
    if let Some(dir) = posts_dir {
        config.paths.posts_dir = dir;
    }
    if let Some(file) = output {
        config.paths.output_file = file;
    }

    let report = pipeline::run(&config).context("index build failed")?;

    println!(
        "Indexed {} posts into {}",
        report.indexed,
        report.output_file.display()
    );
    if report.skipped_drafts > 0 {
        println!("{} drafts left out", report.skipped_drafts);
    }
    if !report.warnings.is_empty() {
        println!("{} files skipped, see the warnings above", report.warnings.len());
    }
    if !report.collisions.is_empty() {
        println!("{} route collisions, see the warnings above", report.collisions.len());
    }

    Ok(())
}

fn new_post(
    config: &Config,
    title: String,
    category: String,
    subcategory: Option<String>,
    author: Option<String>,
) -> Result<()> {
    let post = NewPost {
        title,
        category,
        subcategory,
        author,
    };
    let path = scaffold_post(&config.paths.posts_dir, &post)?;
    println!("Created {}", path.display());

    Ok(())
}

async fn list(config: &Config, query: &str, sort: SortArg, page: u32) -> Result<()> {
    let index = PostIndex::load_or_empty(&config.paths.output_file).await;

    let mut posts = search::filter(index.records(), query);
    search::sort(&mut posts, sort.into());

    if posts.is_empty() {
        println!("No posts found.");
        return Ok(());
    }

    let paginator = Paginator::from(&posts, config.index.page_size);
    for post in paginator.get_page(page)? {
        println!(
            "{}  {}  by {}, {} min read",
            post.date,
            post.route(),
            post.author,
            post.reading_time()
        );
    }
    println!("Page {} of {}", page, paginator.page_count());

    Ok(())
}

async fn show(
    config: &Config,
    category: &str,
    subcategory: Option<&str>,
    slug: &str,
) -> Result<()> {
    let index = PostIndex::load_or_empty(&config.paths.output_file).await;

    let Some(post) = index.find(category, subcategory, slug) else {
        bail!("post not found: {}/{}", category, slug);
    };

    let body = load_body(&config.paths.posts_dir, post).await?;
    println!("{} ({}, by {})", post.title, post.date, post.author);
    println!("{}", body);

    Ok(())
}

async fn categories(config: &Config) -> Result<()> {
    let index = PostIndex::load_or_empty(&config.paths.output_file).await;

    if index.is_empty() {
        println!("No posts found.");
        return Ok(());
    }

    for (category, subcategories) in derive_taxonomy(index.records()) {
        if subcategories.is_empty() {
            println!("{}", category);
        } else {
            let subcategories: Vec<&str> = subcategories.iter().map(String::as_str).collect();
            println!("{}: {}", category, subcategories.join(", "));
        }
    }

    Ok(())
}

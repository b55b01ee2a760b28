//! Subcommand arguments and their handlers.
//!
//! Argument structs carry the clap attributes and convert into core types
//! ([`JobFilter`], [`LikeType`], [`JobStatus`]) so the core crate stays free
//! of CLI concerns. [`Cli`] runs one command against an open connection and
//! prints either markdown or JSON.

use anyhow::{Context, Result};
use assetdb_core::{
    AssetDatabaseConnection, JobEntry, JobFilter, JobInfo, JobStatus, LikeType, ProductEntry,
    ScanFolderEntry, SourceEntry, SourceFileDependencyEntry,
};
use clap::{Args, ValueEnum};
use jiff::Timestamp;
use log::debug;
use serde::Serialize;

use crate::renderer::TerminalRenderer;

/// How a search term is matched against names
#[derive(Debug, Clone, Copy, PartialEq, Eq, ValueEnum)]
pub enum MatchArg {
    /// Names starting with the term
    StartsWith,
    /// Names ending with the term
    EndsWith,
    /// Names containing the term
    Contains,
    /// The term is a LIKE pattern; `%` and `_` are wildcards
    Pattern,
}

impl From<MatchArg> for LikeType {
    fn from(val: MatchArg) -> Self {
        match val {
            MatchArg::StartsWith => LikeType::StartsWith,
            MatchArg::EndsWith => LikeType::EndsWith,
            MatchArg::Contains => LikeType::Matches,
            MatchArg::Pattern => LikeType::Raw,
        }
    }
}

/// Job status accepted by `--status`
#[derive(Debug, Clone, Copy, PartialEq, Eq, ValueEnum)]
pub enum StatusArg {
    Queued,
    InProgress,
    Failed,
    FailedInvalidSourceName,
    Completed,
    Missing,
}

impl From<StatusArg> for JobStatus {
    fn from(val: StatusArg) -> Self {
        match val {
            StatusArg::Queued => JobStatus::Queued,
            StatusArg::InProgress => JobStatus::InProgress,
            StatusArg::Failed => JobStatus::Failed,
            StatusArg::FailedInvalidSourceName => JobStatus::FailedInvalidSourceNameExceedsMaxLimit,
            StatusArg::Completed => JobStatus::Completed,
            StatusArg::Missing => JobStatus::Missing,
        }
    }
}

/// Job constraints shared by the job and product commands
#[derive(Args, Debug, Default)]
pub struct JobFilterArgs {
    /// Only jobs for this platform
    #[arg(long)]
    pub platform: Option<String>,
    /// Only jobs in this state
    #[arg(long, value_enum)]
    pub status: Option<StatusArg>,
    /// Only jobs with this job key (case-insensitive)
    #[arg(long)]
    pub job_key: Option<String>,
}

impl From<JobFilterArgs> for JobFilter {
    fn from(val: JobFilterArgs) -> Self {
        JobFilter {
            builder_guid: None,
            job_key: val.job_key,
            platform: val.platform,
            status: val.status.map_or(JobStatus::Any, JobStatus::from),
        }
    }
}

#[derive(Args, Debug)]
pub struct SourceArgs {
    /// Search source names for this term
    #[arg(long)]
    pub like: Option<String>,
    /// How `--like` is matched
    #[arg(long, value_enum, default_value_t = MatchArg::StartsWith)]
    pub match_type: MatchArg,
    /// Only sources in this scan folder
    #[arg(long)]
    pub scan_folder: Option<i64>,
}

#[derive(Args, Debug)]
pub struct JobArgs {
    /// Resolve the jobs of every source file with this name
    #[arg(long)]
    pub source: Option<String>,
    #[command(flatten)]
    pub filter: JobFilterArgs,
}

#[derive(Args, Debug)]
pub struct ProductArgs {
    /// Only products built from source files with this name
    #[arg(long, conflicts_with = "like")]
    pub source: Option<String>,
    /// Search product names for this term
    #[arg(long)]
    pub like: Option<String>,
    /// How `--like` is matched
    #[arg(long, value_enum, default_value_t = MatchArg::StartsWith)]
    pub match_type: MatchArg,
    #[command(flatten)]
    pub filter: JobFilterArgs,
}

#[derive(Args, Debug)]
pub struct DependencyArgs {
    /// Id of the product whose dependencies are shown
    pub product_id: i64,
    /// Follow dependencies transitively
    #[arg(long)]
    pub all: bool,
}

#[derive(Args, Debug)]
pub struct SourceDependencyArgs {
    /// Source file name
    pub source: String,
    /// Show the sources that depend on SOURCE instead
    #[arg(long)]
    pub reverse: bool,
    /// LIKE pattern the other end of each dependency must match
    #[arg(long)]
    pub filter: Option<String>,
}

/// Runs commands against one open connection.
pub struct Cli {
    db: AssetDatabaseConnection,
    renderer: TerminalRenderer,
    json: bool,
}

impl Cli {
    pub fn new(db: AssetDatabaseConnection, renderer: TerminalRenderer, json: bool) -> Self {
        Self { db, renderer, json }
    }

    pub fn show_info(&self) -> Result<()> {
        let version = self
            .db
            .query_database_version()
            .context("Failed to read the database version")?;
        let path = self.db.database_path();
        if self.json {
            let info = serde_json::json!({
                "database": path,
                "version": version.0,
                "version_name": version.name(),
            });
            println!("{}", serde_json::to_string_pretty(&info)?);
            return Ok(());
        }
        let markdown = format!(
            "# Asset database\n\n**Path:** {}\n**Version:** {version}\n",
            path.display()
        );
        self.renderer.render(&markdown)
    }

    pub fn list_scan_folders(&self) -> Result<()> {
        let mut folders: Vec<ScanFolderEntry> = Vec::new();
        self.db
            .query_scan_folders_table(|folder| {
                folders.push(folder.clone());
                true
            })
            .context("Failed to query scan folders")?;
        self.emit("Scan folders", "scan folders", &folders, scan_folder_line)
    }

    pub fn list_sources(&self, args: SourceArgs) -> Result<()> {
        let mut sources: Vec<SourceEntry> = Vec::new();
        let mut push = |source: &mut SourceEntry| {
            sources.push(source.clone());
            true
        };
        let queried = match (&args.like, args.scan_folder) {
            (Some(term), _) => {
                self.db
                    .query_source_like_source_name(term, args.match_type.into(), &mut push)
            }
            (None, Some(scan_folder_id)) => {
                self.db.query_source_by_scan_folder_id(scan_folder_id, &mut push)
            }
            (None, None) => self.db.query_sources_table(&mut push),
        };
        queried.context("Failed to query sources")?;

        // A search can also be narrowed to one scan folder
        if let (Some(_), Some(scan_folder_id)) = (&args.like, args.scan_folder) {
            sources.retain(|source| source.scan_folder_id == scan_folder_id);
        }
        self.emit("Sources", "sources", &sources, source_line)
    }

    pub fn list_jobs(&self, args: JobArgs) -> Result<()> {
        let filter = JobFilter::from(args.filter);
        debug!("Listing jobs with {filter:?}");

        if let Some(source) = args.source {
            let mut infos: Vec<JobInfo> = Vec::new();
            self.db
                .query_job_info_by_source_name(&source, &filter, |info| {
                    infos.push(info.clone());
                    true
                })
                .context("Failed to query jobs")?;
            return self.emit("Jobs", "jobs", &infos, job_info_line);
        }

        let mut jobs: Vec<JobEntry> = Vec::new();
        self.db
            .query_jobs_table(&filter, |job| {
                jobs.push(job.clone());
                true
            })
            .context("Failed to query jobs")?;
        self.emit("Jobs", "jobs", &jobs, job_line)
    }

    pub fn list_products(&self, args: ProductArgs) -> Result<()> {
        let filter = JobFilter::from(args.filter);
        let mut products: Vec<ProductEntry> = Vec::new();
        let mut push = |product: &mut ProductEntry| {
            products.push(product.clone());
            true
        };
        let queried = match (&args.source, &args.like) {
            (Some(source), _) => self.db.query_product_by_source_name(source, &filter, &mut push),
            (None, Some(term)) => self.db.query_product_like_product_name(
                term,
                args.match_type.into(),
                &filter,
                &mut push,
            ),
            (None, None) => self.db.query_products_table(&filter, &mut push),
        };
        queried.context("Failed to query products")?;
        self.emit("Products", "products", &products, product_line)
    }

    pub fn show_dependencies(&self, args: DependencyArgs) -> Result<()> {
        let mut products: Vec<ProductEntry> = Vec::new();
        let push = |product: &mut ProductEntry| {
            products.push(product.clone());
            true
        };
        let queried = if args.all {
            self.db.query_all_product_dependencies(args.product_id, push)
        } else {
            self.db.query_direct_product_dependencies(args.product_id, push)
        };
        queried.with_context(|| {
            format!("Failed to query dependencies of product {}", args.product_id)
        })?;

        let title = if args.all {
            format!("All dependencies of product {}", args.product_id)
        } else {
            format!("Dependencies of product {}", args.product_id)
        };
        self.emit(&title, "dependencies", &products, product_line)
    }

    pub fn show_source_dependencies(&self, args: SourceDependencyArgs) -> Result<()> {
        let mut dependencies: Vec<SourceFileDependencyEntry> = Vec::new();
        let push = |dependency: &mut SourceFileDependencyEntry| {
            dependencies.push(dependency.clone());
            true
        };
        let filter = args.filter.as_deref();
        let queried = if args.reverse {
            self.db
                .query_source_dependency_by_depends_on_source(&args.source, filter, push)
        } else {
            self.db
                .query_depends_on_source_by_source_dependency(&args.source, filter, push)
        };
        queried.context("Failed to query source dependencies")?;

        if args.reverse {
            let title = format!("Sources depending on {}", args.source);
            self.emit(&title, "dependent sources", &dependencies, |d| {
                format!("`{}`", d.source)
            })
        } else {
            let title = format!("Dependencies of {}", args.source);
            self.emit(&title, "dependencies", &dependencies, |d| {
                format!("`{}`", d.depends_on_source)
            })
        }
    }

    /// Prints `items` as JSON, or as a numbered markdown list under `title`.
    fn emit<T, F>(&self, title: &str, noun: &str, items: &[T], line: F) -> Result<()>
    where
        T: Serialize,
        F: Fn(&T) -> String,
    {
        if self.json {
            println!("{}", serde_json::to_string_pretty(items)?);
            return Ok(());
        }

        let mut markdown = format!("# {title}\n\n");
        if items.is_empty() {
            markdown.push_str(&format!("No {noun} found.\n"));
        }
        for (index, item) in items.iter().enumerate() {
            markdown.push_str(&format!("{}. {}\n", index + 1, line(item)));
        }
        self.renderer.render(&markdown)
    }
}

fn scan_folder_line(folder: &ScanFolderEntry) -> String {
    let mut line = format!(
        "**{}** `{}` (id {}, key {})",
        folder.display_name, folder.path, folder.id, folder.portable_key
    );
    if folder.is_root {
        line.push_str(" *root*");
    }
    line
}

fn source_line(source: &SourceEntry) -> String {
    format!(
        "`{}` (id {}, scan folder {}, guid {})",
        source.name, source.id, source.scan_folder_id, source.guid
    )
}

fn job_line(job: &JobEntry) -> String {
    format!(
        "**{}** on `{}`: {} (id {}, source {}, run key {})",
        job.job_key, job.platform, job.status, job.id, job.source_id, job.job_run_key
    )
}

fn job_info_line(info: &JobInfo) -> String {
    let mut line = format!(
        "**{}** on `{}`: {} for `{}` in `{}` (id {})",
        info.job_key, info.platform, info.status, info.source_file, info.watch_folder, info.job_id
    );
    if let Some(time) = format_log_time(info.last_log_time) {
        line.push_str(&format!(", last log {time} `{}`", info.last_log_file));
    }
    if let Some(time) = format_log_time(info.first_fail_log_time) {
        line.push_str(&format!(", first failure {time} `{}`", info.first_fail_log_file));
    }
    line
}

fn product_line(product: &ProductEntry) -> String {
    format!(
        "`{}` (id {}, job {}, sub id {}, type {})",
        product.name, product.id, product.job_id, product.sub_id, product.asset_type
    )
}

/// Log times are milliseconds since the epoch; zero means never.
fn format_log_time(millis: i64) -> Option<String> {
    if millis <= 0 {
        return None;
    }
    Timestamp::from_millisecond(millis)
        .ok()
        .map(|timestamp| timestamp.to_string())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_filter_args_convert_to_job_filter() {
        let args = JobFilterArgs {
            platform: Some("pc".to_string()),
            status: Some(StatusArg::Failed),
            job_key: None,
        };
        let filter = JobFilter::from(args);
        assert_eq!(filter.platform(), Some("pc"));
        assert_eq!(filter.status, JobStatus::Failed);
        assert!(filter.job_key().is_none());

        let filter = JobFilter::from(JobFilterArgs::default());
        assert_eq!(filter, JobFilter::any());
    }

    #[test]
    fn test_match_arg_maps_to_like_type() {
        assert_eq!(LikeType::from(MatchArg::Contains), LikeType::Matches);
        assert_eq!(LikeType::from(MatchArg::Pattern), LikeType::Raw);
    }

    #[test]
    fn test_log_time_formatting() {
        assert_eq!(format_log_time(0), None);
        assert_eq!(
            format_log_time(1_700_000_000_000).as_deref(),
            Some("2023-11-14T22:13:20Z")
        );
    }
}

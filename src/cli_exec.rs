use std::path::{Path, PathBuf};

use anyhow::{Context, Result};

use epg_console::ingest::{
    self, ActivationKind, ActivationOptions, ActivationReport, ChunkFlow, IngestFlow,
    IngestionWizard, SchemeCommit, SchemeFlow, WizardStep,
};
use epg_console::model::{ConsoleConfig, StatusReport};
use epg_console::remote::{
    BackendClient, ChunkAction, ExportFormat, UpdateChecker, UpdateState, UploadFile,
};

use crate::{AnnounceCommands, BrowseCommands, Commands, IngestCommands};

pub(crate) fn handle_command(config: ConsoleConfig, command: Commands) -> Result<()> {
    let runtime = tokio::runtime::Builder::new_current_thread()
        .enable_all()
        .build()
        .context("build tokio runtime")?;
    let client = BackendClient::new(&config)?;
    runtime.block_on(exec(&client, command))
}

async fn exec(client: &BackendClient, command: Commands) -> Result<()> {
    match command {
        Commands::Tui => anyhow::bail!("the console runs without a subcommand"),
        Commands::Services { json } => {
            let report = client.service_report().await?;
            if json {
                print_json(&report, "serialize services report")?;
            } else {
                print_status(&report.into_status_report());
            }
        }
        Commands::Carousel { json } => {
            let report = client.carousel_report().await?;
            if json {
                print_json(&report, "serialize carousel report")?;
            } else {
                print_status(&report.to_status_report());
                for stream in &report.streams {
                    println!("{}", stream.key());
                    for file in &stream.files {
                        println!("  {:<30} {} bit/s", file.title, file.bitrate);
                    }
                }
            }
        }
        Commands::System { json } => {
            let report = client.system_report().await?;
            if json {
                print_json(&report, "serialize system report")?;
            } else {
                if let Some(start) = &report.system_start {
                    println!("system start: {}", start);
                }
                for v in report.version_labels() {
                    println!("{}", v);
                }
                for (name, module, show_details) in report.module_rows() {
                    println!("{:<10} {:<5} {}", name, module.state().label(), module.message);
                    if show_details {
                        for d in module.detail_lines() {
                            println!("    {}", d);
                        }
                    }
                }
            }
        }
        Commands::Ingest { command } => handle_ingest(client, command).await?,
        Commands::Browse { command } => handle_browse(client, command).await?,
        Commands::Export {
            format,
            channel,
            out,
        } => {
            let format = ExportFormat::parse(&format)?;
            let channel = channel.unwrap_or_default();
            let bytes = client.export_epg(format, &channel).await?;
            let out = out.unwrap_or_else(|| PathBuf::from(format.file_name(&channel)));
            std::fs::write(&out, &bytes).with_context(|| format!("write {}", out.display()))?;
            println!("{} bytes written to {}", bytes.len(), out.display());
        }
        Commands::UpdateCheck { apply } => {
            let mut checker = UpdateChecker::default();
            match checker.record(client.check_update(apply).await) {
                UpdateState::UpToDate(msg) => println!("up to date: {}", msg),
                UpdateState::Available(msg) => {
                    println!("update available: {}", msg);
                    println!("run `epg-console update-check --apply` to install it");
                }
                UpdateState::Failed(msg) => anyhow::bail!("update check failed: {}", msg),
                UpdateState::Unknown => {}
            }
        }
        Commands::Maintenance { file, report } => {
            let upload = UploadFile::read(&file)?;
            let result = client.maintenance(&upload).await?;
            if let Some(msg) = &result.message {
                println!("{}", msg);
            }
            if let Some(pod) = &result.pod {
                println!("pod: {}", pod);
            }
            if let Some(content) = &result.content {
                std::fs::write(&report, content)
                    .with_context(|| format!("write {}", report.display()))?;
                println!("report written to {}", report.display());
            }
            if !result.success {
                anyhow::bail!("maintenance failed");
            }
        }
        Commands::Announce { command } => handle_announce(client, command).await?,
    }
    Ok(())
}

async fn handle_ingest(client: &BackendClient, command: IngestCommands) -> Result<()> {
    match command {
        IngestCommands::Chunk {
            file,
            validate_only,
        } => {
            let mut wizard = IngestionWizard::<ChunkFlow>::new();
            validate(client, &mut wizard, &file).await?;
            if validate_only {
                return Ok(());
            }
            let step = ingest::commit(client, &mut wizard, ()).await?;
            finish_commit(&wizard, step)?;
        }
        IngestCommands::Batch { files } => {
            let uploads = files
                .iter()
                .map(|p| UploadFile::read(p))
                .collect::<Result<Vec<_>, _>>()?;
            let results = client.upload_and_save(&uploads).await?;
            let mut failed = 0;
            for r in &results {
                if !r.success {
                    failed += 1;
                }
                println!("{} {}", if r.success { "ok  " } else { "FAIL" }, r.message);
            }
            if results.is_empty() || failed > 0 {
                anyhow::bail!("{} of {} file(s) failed", failed, uploads.len());
            }
        }
        IngestCommands::Scheme {
            file,
            description,
            validate_only,
            activate,
            options,
        } => {
            let options = parse_options(&options)?;
            let mut wizard = IngestionWizard::<SchemeFlow>::new();
            validate(client, &mut wizard, &file).await?;
            if validate_only {
                return Ok(());
            }
            let description = description
                .or_else(|| wizard.report().map(|m| m.description.clone()))
                .unwrap_or_default();
            let step = ingest::commit(client, &mut wizard, SchemeCommit { description }).await?;
            finish_commit(&wizard, step)?;
            if activate {
                run_activation(client, &wizard, &options).await?;
            }
        }
        IngestCommands::Stage {
            target,
            activate,
            options,
        } => {
            let options = parse_options(&options)?;
            let mut wizard = IngestionWizard::<SchemeFlow>::new();
            let step = ingest::stage_existing(client, &mut wizard, &target).await?;
            print_lines(wizard.status_lines());
            if step != WizardStep::Staged {
                anyhow::bail!("scheme {} could not be staged", target);
            }
            if activate {
                run_activation(client, &wizard, &options).await?;
            }
        }
        IngestCommands::Maintain { options } => {
            let options = parse_options(&options)?;
            let report = client
                .activate(ActivationKind::Maintain, &options, None)
                .await?;
            finish_activation(&report)?;
        }
    }
    Ok(())
}

async fn validate<F: IngestFlow>(
    client: &BackendClient,
    wizard: &mut IngestionWizard<F>,
    path: &Path,
) -> Result<()> {
    let file = UploadFile::read(path)?;
    let step = ingest::upload(client, wizard, &file).await?;
    print_lines(wizard.status_lines());
    if step != WizardStep::Staged {
        anyhow::bail!("{} {} was not accepted", F::NAME, file.name);
    }
    Ok(())
}

fn finish_commit<F: IngestFlow>(wizard: &IngestionWizard<F>, step: WizardStep) -> Result<()> {
    if step == WizardStep::Committed {
        println!("{} saved", F::NAME);
        return Ok(());
    }
    match wizard.failure() {
        Some(err) => Err::<(), _>(err.clone()).context(format!("save {}", F::NAME)),
        None => anyhow::bail!("save {}: {}", F::NAME, step.label()),
    }
}

async fn run_activation<F: IngestFlow>(
    client: &BackendClient,
    wizard: &IngestionWizard<F>,
    options: &ActivationOptions,
) -> Result<()> {
    let report = ingest::activate(client, wizard, options).await?;
    finish_activation(&report)
}

fn finish_activation(report: &ActivationReport) -> Result<()> {
    print_lines(report.lines());
    if !report.succeeded() {
        anyhow::bail!("activation failed");
    }
    Ok(())
}

fn parse_options(words: &[String]) -> Result<ActivationOptions> {
    Ok(ActivationOptions::parse(words.iter().map(String::as_str))?)
}

async fn handle_browse(client: &BackendClient, command: BrowseCommands) -> Result<()> {
    match command {
        BrowseCommands::Chunks { json } => {
            let list = client.list_chunks().await?;
            if json {
                print_json(&list, "serialize chunk list")?;
            } else {
                for c in &list {
                    let state = if c.playing { "playing" } else { "" };
                    println!(
                        "{:<12} {:<30} {:<20} {} {}",
                        c.target,
                        c.title(),
                        c.destination(),
                        c.timestamp,
                        state
                    );
                }
            }
        }
        BrowseCommands::Schemes { json } => {
            let list = client.list_schemes().await?;
            if json {
                print_json(&list, "serialize scheme list")?;
            } else {
                for s in &list {
                    println!(
                        "{:<12} {:<30} {} services={} eit={} rules={}",
                        s.target, s.description, s.timestamp, s.channel, s.eit, s.rule
                    );
                }
            }
        }
        BrowseCommands::Current { json } => {
            let current = client.current_scheme().await?;
            if json {
                print_json(&current, "serialize current scheme")?;
            } else {
                println!("description: {}", current.description);
                println!("source: {}", current.source);
                println!("loaded: {}", current.timestamp);
                println!(
                    "services={} eit={} rules={}",
                    current.channel, current.eit, current.rule
                );
            }
        }
        BrowseCommands::Preview { target } => {
            print!("{}", client.preview_chunk(&target).await?);
        }
        BrowseCommands::Download { target, out } => {
            let bytes = client.download_chunk(&target).await?;
            std::fs::write(&out, &bytes).with_context(|| format!("write {}", out.display()))?;
            println!("{} bytes written to {}", bytes.len(), out.display());
        }
        BrowseCommands::Play { target } => {
            chunk_action(client, ChunkAction::Play, &target).await?;
        }
        BrowseCommands::Pause { target } => {
            chunk_action(client, ChunkAction::Pause, &target).await?;
        }
        BrowseCommands::DeleteChunk { target } => {
            chunk_action(client, ChunkAction::Delete, &target).await?;
        }
        BrowseCommands::DeleteScheme { target } => {
            acknowledge("delete", &target, client.delete_scheme(&target).await?)?;
        }
    }
    Ok(())
}

async fn chunk_action(client: &BackendClient, action: ChunkAction, target: &str) -> Result<()> {
    let ok = client.chunk_action(action, target).await?;
    acknowledge(action.label(), target, ok)
}

fn acknowledge(label: &str, target: &str, ok: bool) -> Result<()> {
    if !ok {
        anyhow::bail!("{} {}: not acknowledged by the backend", label, target);
    }
    println!("{} {}: done", label, target);
    Ok(())
}

async fn handle_announce(client: &BackendClient, command: AnnounceCommands) -> Result<()> {
    let current = client.announcement().await?;
    if !current.success {
        anyhow::bail!("announcements unavailable");
    }
    let mut set = current.announce.clone().unwrap_or_default();
    match command {
        AnnounceCommands::Show { json } => {
            if json {
                print_json(&set, "serialize announcements")?;
            } else {
                print_slot("present", set.present.publish, &set.present.text);
                print_slot("following", set.following.publish, &set.following.text);
            }
        }
        AnnounceCommands::Set {
            present,
            following,
            publish_present,
            publish_following,
        } => {
            if let Some(text) = present {
                set.present.text = text;
            }
            if let Some(text) = following {
                set.following.text = text;
            }
            if let Some(p) = publish_present {
                set.present.publish = p;
            }
            if let Some(p) = publish_following {
                set.following.publish = p;
            }
            let saved = client.save_announcement(&set).await?;
            if !saved.success {
                anyhow::bail!("announcements were not saved");
            }
            println!("announcements saved");
        }
    }
    Ok(())
}

fn print_slot(name: &str, publish: bool, text: &str) {
    let flag = if publish { "on air" } else { "off" };
    println!("{:<10} [{}] {}", name, flag, text);
}

fn print_status(report: &StatusReport) {
    println!("{}  {}", report.timestamp, report.overall.label());
    if let Some(msg) = &report.message {
        println!("{}", msg);
    }
    for e in &report.entries {
        println!(
            "{:<12} {:<10} {:<5} {}",
            e.id,
            e.display_name,
            e.state.label(),
            e.last_update
        );
    }
}

fn print_lines(lines: Vec<String>) {
    for l in lines {
        println!("{}", l);
    }
}

fn print_json<T: serde::Serialize>(value: &T, what: &str) -> Result<()> {
    println!(
        "{}",
        serde_json::to_string_pretty(value).with_context(|| what.to_string())?
    );
    Ok(())
}

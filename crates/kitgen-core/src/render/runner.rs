//! Executing a plan's actions against the filesystem

use super::engine::RenderEngine;
use super::templates::{collect_files, PlannedFile};
use crate::generator::Action;
use crate::orchestrator::Plan;
use crate::prompt::Reporter;
use anyhow::{Context, Result};
use async_trait::async_trait;
use colored::Colorize;
use std::path::{Path, PathBuf};
use std::process::Stdio;
use tokio::fs;
use tokio::io::{AsyncBufReadExt, BufReader};
use tokio::process::Command;

/// Executes a merged plan. Called once per run, after every generator's
/// prompts have been answered.
#[async_trait]
pub trait ActionRunner: Sync {
    async fn run(&self, plan: &Plan, engine: &RenderEngine, reporter: &dyn Reporter)
        -> Result<()>;
}

/// Runner that renders templates to disk and runs processes
#[derive(Debug, Clone, Copy, Default)]
pub struct FsActionRunner;

/// Result of rendering the template set
#[derive(Debug, Default)]
pub struct RenderSummary {
    pub written: Vec<PathBuf>,
    pub skipped: Vec<PathBuf>,
}

#[async_trait]
impl ActionRunner for FsActionRunner {
    async fn run(
        &self,
        plan: &Plan,
        engine: &RenderEngine,
        reporter: &dyn Reporter,
    ) -> Result<()> {
        let data = plan.data.to_json();
        let silent = plan.data.is_silent();
        let mut rendered = false;

        for action in &plan.actions {
            match action {
                // The template set is already merged across generators, so
                // one render covers every Render action in the plan
                Action::Render if rendered => {}
                Action::Render => {
                    let out_dir = output_dir(plan)?;
                    let files = collect_files(&plan.template_data)?;
                    let summary =
                        render_files(&files, &out_dir, engine, &data, plan.data.flag("force"))
                            .await?;
                    if !silent {
                        report_summary(&summary, &out_dir, reporter)?;
                    }
                    rendered = true;
                }
                Action::Run {
                    command,
                    args,
                    skip_when,
                } => {
                    let command = engine.render_str(command, &data)?;
                    if let Some(key) = skip_when {
                        if plan.data.flag(key) {
                            if !silent {
                                reporter.info(&format!("Skipping {} (--{})", command, key))?;
                            }
                            continue;
                        }
                    }
                    let out_dir = output_dir(plan)?;
                    let args = args
                        .iter()
                        .map(|arg| engine.render_str(arg, &data))
                        .collect::<Result<Vec<_>>>()?;
                    let reporter = if silent { None } else { Some(reporter) };
                    run_command(&command, &args, &out_dir, reporter).await?;
                }
                Action::Message { text } => {
                    let message = engine.render_str(text, &data)?;
                    if !silent {
                        reporter.info(&message)?;
                    }
                }
            }
        }

        Ok(())
    }
}

/// Resolve `outDir` from the data bag against the current directory
fn output_dir(plan: &Plan) -> Result<PathBuf> {
    let out_dir = plan
        .data
        .string("outDir")
        .filter(|s| !s.is_empty())
        .ok_or_else(|| {
            anyhow::anyhow!("No output directory given. Pass --outDir or answer the outDir prompt.")
        })?;

    let path = PathBuf::from(out_dir);
    if path.is_absolute() {
        return Ok(path);
    }
    let current_dir = std::env::current_dir().unwrap_or_else(|_| PathBuf::from("."));
    Ok(current_dir.join(path))
}

/// Write planned files under `target_dir`. Existing files are left alone
/// unless `force` is set.
pub async fn render_files(
    files: &[PlannedFile],
    target_dir: &Path,
    engine: &RenderEngine,
    data: &serde_json::Value,
    force: bool,
) -> Result<RenderSummary> {
    fs::create_dir_all(target_dir)
        .await
        .with_context(|| format!("Failed to create directory: {}", target_dir.display()))?;

    let mut summary = RenderSummary::default();

    for file in files {
        let target_path = target_dir.join(&file.target);
        if !force && fs::try_exists(&target_path).await.unwrap_or(false) {
            summary.skipped.push(file.target.clone());
            continue;
        }

        if let Some(parent) = target_path.parent() {
            fs::create_dir_all(parent)
                .await
                .with_context(|| format!("Failed to create directory: {}", parent.display()))?;
        }

        if file.render {
            let template = fs::read_to_string(&file.source)
                .await
                .with_context(|| format!("Failed to read {}", file.source.display()))?;
            let content = engine
                .render_str(&template, data)
                .with_context(|| format!("Failed to render {}", file.source.display()))?;
            fs::write(&target_path, content)
                .await
                .with_context(|| format!("Failed to write file: {}", target_path.display()))?;
        } else {
            fs::copy(&file.source, &target_path)
                .await
                .with_context(|| format!("Failed to write file: {}", target_path.display()))?;
        }

        summary.written.push(file.target.clone());
    }

    Ok(summary)
}

fn report_summary(summary: &RenderSummary, out_dir: &Path, reporter: &dyn Reporter) -> Result<()> {
    reporter.success(&format!(
        "Created {} files in {}",
        summary.written.len(),
        out_dir.display()
    ))?;
    if !summary.skipped.is_empty() {
        let names: Vec<String> = summary
            .skipped
            .iter()
            .map(|p| p.display().to_string())
            .collect();
        reporter.warning(&format!(
            "Skipped {} existing files (use --force to overwrite): {}",
            summary.skipped.len(),
            names.join(", ")
        ))?;
    }
    Ok(())
}

/// Run a process in `dir`. Output is streamed when there is a reporter to
/// announce it, and discarded otherwise.
async fn run_command(
    command: &str,
    args: &[String],
    dir: &Path,
    reporter: Option<&dyn Reporter>,
) -> Result<()> {
    let display = std::iter::once(command)
        .chain(args.iter().map(String::as_str))
        .collect::<Vec<_>>()
        .join(" ");

    let silent = match reporter {
        Some(reporter) => {
            reporter.info(&format!("Running: {}", display))?;
            false
        }
        None => true,
    };

    let output = if silent { Stdio::null() } else { Stdio::piped() };
    let errors = if silent { Stdio::null() } else { Stdio::piped() };
    let mut child = Command::new(command)
        .args(args)
        .current_dir(dir)
        .stdout(output)
        .stderr(errors)
        .spawn()
        .with_context(|| format!("Failed to start `{}`", display))?;

    if let (Some(stdout), Some(stderr)) = (child.stdout.take(), child.stderr.take()) {
        let mut stdout_reader = BufReader::new(stdout).lines();
        let mut stderr_reader = BufReader::new(stderr).lines();
        let mut stdout_done = false;
        let mut stderr_done = false;

        while !(stdout_done && stderr_done) {
            tokio::select! {
                line = stdout_reader.next_line(), if !stdout_done => match line {
                    Ok(Some(line)) => println!("  {}", line),
                    Ok(None) => stdout_done = true,
                    Err(e) => {
                        eprintln!("{} {}", "Error reading stdout:".red(), e);
                        stdout_done = true;
                    }
                },
                line = stderr_reader.next_line(), if !stderr_done => match line {
                    Ok(Some(line)) => eprintln!("  {}", line.yellow()),
                    Ok(None) => stderr_done = true,
                    Err(e) => {
                        eprintln!("{} {}", "Error reading stderr:".red(), e);
                        stderr_done = true;
                    }
                },
            }
        }
    }

    let status = child
        .wait()
        .await
        .with_context(|| format!("Failed to wait for `{}`", display))?;
    if !status.success() {
        anyhow::bail!("`{}` exited with {}", display, status);
    }

    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::args::ArgumentBag;
    use crate::orchestrator::TemplateData;
    use std::io;
    use std::sync::Mutex;

    #[derive(Default)]
    struct Quiet {
        lines: Mutex<Vec<String>>,
    }

    impl Reporter for Quiet {
        fn intro(&self, title: &str) -> io::Result<()> {
            self.lines.lock().unwrap().push(format!("intro: {}", title));
            Ok(())
        }
        fn info(&self, message: &str) -> io::Result<()> {
            self.lines.lock().unwrap().push(format!("info: {}", message));
            Ok(())
        }
        fn warning(&self, message: &str) -> io::Result<()> {
            self.lines.lock().unwrap().push(format!("warning: {}", message));
            Ok(())
        }
        fn success(&self, message: &str) -> io::Result<()> {
            self.lines.lock().unwrap().push(format!("success: {}", message));
            Ok(())
        }
        fn error(&self, message: &str) -> io::Result<()> {
            self.lines.lock().unwrap().push(format!("error: {}", message));
            Ok(())
        }
        fn print(&self, text: &str) -> io::Result<()> {
            self.lines.lock().unwrap().push(text.to_string());
            Ok(())
        }
        fn outro(&self, message: &str) -> io::Result<()> {
            self.lines.lock().unwrap().push(format!("outro: {}", message));
            Ok(())
        }
    }

    fn template_root() -> tempfile::TempDir {
        let root = tempfile::tempdir().unwrap();
        let base = root.path().join("base");
        std::fs::create_dir_all(base.join("src")).unwrap();
        std::fs::write(base.join("README.md.hbs"), "# {{appName}}\n").unwrap();
        std::fs::write(base.join("src/index.js"), "export {};\n").unwrap();
        root
    }

    fn plan(root: &Path, out: &Path, actions: Vec<Action>) -> Plan {
        let mut data = ArgumentBag::new();
        data.insert("appName", "demo");
        data.insert("outDir", out.display().to_string());
        Plan {
            actions,
            template_data: vec![TemplateData {
                template_dirs: vec![root.join("base")],
                addon: false,
            }],
            data,
        }
    }

    #[tokio::test]
    async fn test_render_writes_files() {
        let root = template_root();
        let out = tempfile::tempdir().unwrap();
        let reporter = Quiet::default();

        let plan = plan(root.path(), out.path(), vec![Action::Render, Action::Render]);
        FsActionRunner
            .run(&plan, &RenderEngine::new(), &reporter)
            .await
            .unwrap();

        let readme = std::fs::read_to_string(out.path().join("README.md")).unwrap();
        assert_eq!(readme, "# demo\n");
        assert!(out.path().join("src/index.js").exists());

        // second Render action is a no-op, so no skip warning
        let lines = reporter.lines.lock().unwrap();
        assert_eq!(lines.len(), 1);
        assert!(lines[0].starts_with("success: Created 2 files"));
    }

    #[tokio::test]
    async fn test_existing_files_need_force() {
        let root = template_root();
        let out = tempfile::tempdir().unwrap();
        std::fs::write(out.path().join("README.md"), "keep me").unwrap();

        let mut plan = plan(root.path(), out.path(), vec![Action::Render]);
        FsActionRunner
            .run(&plan, &RenderEngine::new(), &Quiet::default())
            .await
            .unwrap();
        assert_eq!(
            std::fs::read_to_string(out.path().join("README.md")).unwrap(),
            "keep me"
        );

        plan.data.insert("force", true);
        FsActionRunner
            .run(&plan, &RenderEngine::new(), &Quiet::default())
            .await
            .unwrap();
        assert_eq!(
            std::fs::read_to_string(out.path().join("README.md")).unwrap(),
            "# demo\n"
        );
    }

    #[tokio::test]
    async fn test_silent_suppresses_reporting() {
        let root = template_root();
        let out = tempfile::tempdir().unwrap();
        let reporter = Quiet::default();

        let mut plan = plan(
            root.path(),
            out.path(),
            vec![
                Action::Render,
                Action::Message {
                    text: "Created {{appName}}".to_string(),
                },
            ],
        );
        plan.data.insert("silent", true);
        FsActionRunner
            .run(&plan, &RenderEngine::new(), &reporter)
            .await
            .unwrap();

        assert!(reporter.lines.lock().unwrap().is_empty());
    }

    #[tokio::test]
    async fn test_message_is_rendered() {
        let root = template_root();
        let out = tempfile::tempdir().unwrap();
        let reporter = Quiet::default();

        let plan = plan(
            root.path(),
            out.path(),
            vec![Action::Message {
                text: "Created {{appName}}".to_string(),
            }],
        );
        FsActionRunner
            .run(&plan, &RenderEngine::new(), &reporter)
            .await
            .unwrap();

        assert_eq!(*reporter.lines.lock().unwrap(), ["info: Created demo"]);
    }

    #[tokio::test]
    async fn test_run_skipped_by_flag() {
        let root = template_root();
        let out = tempfile::tempdir().unwrap();
        let reporter = Quiet::default();

        let mut plan = plan(
            root.path(),
            out.path(),
            vec![Action::Run {
                command: "definitely-not-a-real-binary".to_string(),
                args: vec![],
                skip_when: Some("noInstall".to_string()),
            }],
        );
        plan.data.insert("noInstall", true);
        FsActionRunner
            .run(&plan, &RenderEngine::new(), &reporter)
            .await
            .unwrap();

        assert_eq!(reporter.lines.lock().unwrap().len(), 1);
    }

    #[tokio::test]
    async fn test_failures_propagate() {
        let root = template_root();
        let out = tempfile::tempdir().unwrap();

        let mut plan = plan(
            root.path(),
            out.path(),
            vec![Action::Run {
                command: "definitely-not-a-real-binary".to_string(),
                args: vec![],
                skip_when: None,
            }],
        );
        plan.data.insert("silent", true);
        let err = FsActionRunner
            .run(&plan, &RenderEngine::new(), &Quiet::default())
            .await
            .unwrap_err();
        assert!(err.to_string().contains("definitely-not-a-real-binary"));
    }

    #[cfg(unix)]
    #[tokio::test]
    async fn test_run_renders_command_and_args() {
        let root = template_root();
        let out = tempfile::tempdir().unwrap();
        let reporter = Quiet::default();

        let mut plan = plan(
            root.path(),
            out.path(),
            vec![Action::Run {
                command: "{{shell}}".to_string(),
                args: vec![
                    "-c".to_string(),
                    "test '{{packageManager}}' = yarn".to_string(),
                ],
                skip_when: None,
            }],
        );
        plan.data.insert("shell", "sh");
        plan.data.insert("packageManager", "yarn");
        FsActionRunner
            .run(&plan, &RenderEngine::new(), &reporter)
            .await
            .unwrap();

        assert_eq!(
            *reporter.lines.lock().unwrap(),
            ["info: Running: sh -c test 'yarn' = yarn"]
        );
    }

    #[tokio::test]
    async fn test_missing_out_dir() {
        let root = template_root();
        let out = tempfile::tempdir().unwrap();
        let mut plan = plan(root.path(), out.path(), vec![Action::Render]);
        plan.data = ArgumentBag::new();

        let err = FsActionRunner
            .run(&plan, &RenderEngine::new(), &Quiet::default())
            .await
            .unwrap_err();
        assert!(err.to_string().contains("outDir"));
    }
}

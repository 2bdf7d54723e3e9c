//! `LocalStore` implementation that drives the `task` command line.
//!
//! The binary is invoked directly with an argument vector, never through a
//! shell, so titles and ids need no quoting. Description text is always
//! passed after `--` so Taskwarrior does not parse it as attributes.

use std::path::PathBuf;
use std::process::Stdio;

use async_trait::async_trait;
use tokio::process::Command;
use tracing::{debug, info, warn};
use twtodo_core::{timestamp, IdentityKey, LocalTask, LocalUuid, UDA_LIST_ID, UDA_TASK_ID};
use uuid::Uuid;

use crate::error::StoreError;
use crate::export::parse_export;
use crate::store::LocalStore;

/// Taskwarrior exits with this code when a report matches nothing.
const EXIT_NO_MATCHES: i32 = 1;

/// Captured result of one `task` invocation.
#[derive(Debug)]
struct CommandOutput {
    command: String,
    code: i32,
    stdout: String,
    stderr: String,
}

impl CommandOutput {
    fn success(&self) -> bool {
        self.code == 0
    }

    fn into_failure(self) -> StoreError {
        StoreError::CommandFailed {
            command: self.command,
            code: self.code,
            stderr: self.stderr.trim().to_string(),
        }
    }
}

/// Taskwarrior driven as a subprocess.
///
/// # Example
///
/// ```rust,no_run
/// use twtodo_taskwarrior::TaskwarriorCli;
///
/// let store = TaskwarriorCli::new("task")
///     .with_taskrc("/tmp/test/taskrc")
///     .with_data_dir("/tmp/test/task");
/// ```
#[derive(Debug, Clone)]
pub struct TaskwarriorCli {
    /// Path to the task executable.
    task_path: String,

    /// Override for `TASKRC`.
    taskrc: Option<PathBuf>,

    /// Override for `TASKDATA`.
    data_dir: Option<PathBuf>,

    /// Additional environment variables.
    env_vars: Vec<(String, String)>,
}

impl TaskwarriorCli {
    /// Create a new adapter for the given executable.
    ///
    /// The path can be just "task" to use PATH lookup, or a full path.
    pub fn new(task_path: impl Into<String>) -> Self {
        Self {
            task_path: task_path.into(),
            taskrc: None,
            data_dir: None,
            env_vars: Vec::new(),
        }
    }

    /// Use a specific `.taskrc`.
    pub fn with_taskrc(mut self, path: impl Into<PathBuf>) -> Self {
        self.taskrc = Some(path.into());
        self
    }

    /// Use a specific data directory.
    pub fn with_data_dir(mut self, path: impl Into<PathBuf>) -> Self {
        self.data_dir = Some(path.into());
        self
    }

    /// Add an environment variable.
    pub fn with_env(mut self, key: impl Into<String>, value: impl Into<String>) -> Self {
        self.env_vars.push((key.into(), value.into()));
        self
    }

    async fn run(&self, args: &[String]) -> Result<CommandOutput, StoreError> {
        let command = format!("{} {}", self.task_path, args.join(" "));
        debug!(command = %command, "Running task");

        let mut cmd = Command::new(&self.task_path);
        cmd.args(args)
            .stdin(Stdio::null())
            .stdout(Stdio::piped())
            .stderr(Stdio::piped());

        if let Some(taskrc) = &self.taskrc {
            cmd.env("TASKRC", taskrc);
        }
        if let Some(data_dir) = &self.data_dir {
            cmd.env("TASKDATA", data_dir);
        }
        for (key, value) in &self.env_vars {
            cmd.env(key, value);
        }

        let output = cmd.output().await.map_err(|e| {
            if e.kind() == std::io::ErrorKind::NotFound {
                StoreError::TaskNotFound(self.task_path.clone())
            } else {
                StoreError::Spawn(e)
            }
        })?;

        let out = CommandOutput {
            command,
            code: output.status.code().unwrap_or(-1),
            stdout: String::from_utf8_lossy(&output.stdout).into_owned(),
            stderr: String::from_utf8_lossy(&output.stderr).into_owned(),
        };
        debug!(code = out.code, "task exited");
        Ok(out)
    }

    /// Run a command and return stdout, failing on any non-zero exit.
    async fn run_checked(&self, args: &[String]) -> Result<String, StoreError> {
        let out = self.run(args).await?;
        if !out.success() {
            return Err(out.into_failure());
        }
        Ok(out.stdout)
    }

    /// Run the `all` report with a filter and report whether anything matched.
    async fn matches(&self, filter: Vec<String>) -> Result<bool, StoreError> {
        let mut args = vec!["rc.verbose=nothing".to_string()];
        args.extend(filter);
        args.push("all".to_string());

        let out = self.run(&args).await?;
        match classify_report_exit(out.code) {
            Some(found) => Ok(found),
            None => Err(out.into_failure()),
        }
    }

    async fn resolve_uuid(&self, id: &str) -> Result<LocalUuid, StoreError> {
        let args = vec!["_get".to_string(), format!("{id}.uuid")];
        let stdout = self.run_checked(&args).await?;
        let uuid = stdout.trim();
        if Uuid::parse_str(uuid).is_err() {
            return Err(StoreError::UnparsableOutput {
                command: format!("task {}", args.join(" ")),
                output: stdout,
            });
        }
        Ok(LocalUuid::new(uuid))
    }
}

impl Default for TaskwarriorCli {
    fn default() -> Self {
        Self::new("task")
    }
}

#[async_trait]
impl LocalStore for TaskwarriorCli {
    async fn exists(&self, key: &IdentityKey) -> Result<bool, StoreError> {
        self.matches(identity_filter(key)).await
    }

    async fn create(&self, title: &str, key: &IdentityKey) -> Result<LocalUuid, StoreError> {
        let args = create_args(title, key);
        let stdout = self.run_checked(&args).await?;

        match parse_created(&stdout) {
            Some(Created::Uuid(uuid)) => {
                info!(uuid = %uuid, key = %key, "Taskwarrior task created");
                Ok(uuid)
            }
            Some(Created::Id(id)) => {
                let uuid = self.resolve_uuid(&id).await?;
                info!(uuid = %uuid, key = %key, "Taskwarrior task created");
                Ok(uuid)
            }
            None => Err(StoreError::UnparsableOutput {
                command: "task add".to_string(),
                output: stdout,
            }),
        }
    }

    async fn update(&self, task: &LocalTask) -> Result<(), StoreError> {
        if task.uuid.is_blank() {
            return Err(StoreError::EmptyUuid(task.task.title.clone()));
        }

        if !self.matches(vec![format!("uuid:{}", task.uuid)]).await? {
            warn!(uuid = %task.uuid, "Task disappeared before update");
            return Err(StoreError::NotFound(task.uuid.to_string()));
        }

        self.run_checked(&modify_args(task)).await?;
        Ok(())
    }

    async fn export_all(&self) -> Result<Vec<LocalTask>, StoreError> {
        let args = vec![
            "rc.json.array=on".to_string(),
            format!("{UDA_TASK_ID}.any:"),
            "export".to_string(),
        ];
        // Overrides from TASKRC/TASKDATA are reported on stderr, so only stdout is parsed.
        let stdout = self.run_checked(&args).await?;
        let tasks = parse_export(&stdout)?;
        debug!(count = tasks.len(), "Exported imported tasks");
        Ok(tasks)
    }

    async fn uda_exists(&self, name: &str) -> Result<bool, StoreError> {
        validate_uda_name(name)?;
        let stdout = self.run_checked(&["_udas".to_string()]).await?;
        Ok(stdout.lines().any(|line| line.trim() == name))
    }

    async fn create_uda(&self, name: &str, label: &str) -> Result<(), StoreError> {
        validate_uda_name(name)?;
        for (setting, value) in [("type", "string"), ("label", label)] {
            let args = vec![
                "rc.confirmation=off".to_string(),
                "config".to_string(),
                format!("uda.{name}.{setting}"),
                value.to_string(),
            ];
            self.run_checked(&args).await?;
        }
        info!(uda = %name, label = %label, "UDA configured");
        Ok(())
    }
}

/// Map the exit code of a report to "matched" / "no match" / unexpected.
fn classify_report_exit(code: i32) -> Option<bool> {
    match code {
        0 => Some(true),
        EXIT_NO_MATCHES => Some(false),
        _ => None,
    }
}

fn identity_filter(key: &IdentityKey) -> Vec<String> {
    vec![
        format!("{UDA_LIST_ID}.is:{}", key.list_id),
        format!("{UDA_TASK_ID}.is:{}", key.task_id),
    ]
}

fn identity_attributes(key: &IdentityKey) -> [String; 2] {
    [
        format!("{UDA_LIST_ID}:{}", key.list_id),
        format!("{UDA_TASK_ID}:{}", key.task_id),
    ]
}

fn create_args(title: &str, key: &IdentityKey) -> Vec<String> {
    let mut args = vec!["rc.verbose=new-uuid".to_string(), "add".to_string()];
    args.extend(identity_attributes(key));
    args.push("--".to_string());
    args.push(title.to_string());
    args
}

fn modify_args(task: &LocalTask) -> Vec<String> {
    let end = task
        .task
        .completed_at
        .as_ref()
        .map(timestamp::format_local)
        .unwrap_or_default();

    let mut args = vec![
        "rc.confirmation=off".to_string(),
        task.uuid.to_string(),
        "modify".to_string(),
    ];
    args.extend(identity_attributes(&task.task.key));
    args.push(format!("status:{}", task.task.status.as_local()));
    args.push(format!("end:{end}"));
    args.push("--".to_string());
    args.push(task.task.title.clone());
    args
}

#[derive(Debug, PartialEq)]
enum Created {
    Uuid(LocalUuid),
    Id(String),
}

/// Find the identity in `Created task <uuid|id>.`.
fn parse_created(stdout: &str) -> Option<Created> {
    let line = stdout
        .lines()
        .find_map(|line| line.trim().strip_prefix("Created task "))?;
    let token = line.trim().trim_end_matches('.');

    if Uuid::parse_str(token).is_ok() {
        Some(Created::Uuid(LocalUuid::new(token)))
    } else if !token.is_empty() && token.chars().all(|c| c.is_ascii_digit()) {
        Some(Created::Id(token.to_string()))
    } else {
        None
    }
}

fn validate_uda_name(name: &str) -> Result<(), StoreError> {
    let valid = !name.is_empty()
        && name
            .chars()
            .all(|c| c.is_ascii_alphanumeric() || c == '_');
    if valid {
        Ok(())
    } else {
        Err(StoreError::InvalidUdaName(name.to_string()))
    }
}

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum RenderableSeverity {
    Info,
    Warning,
    Error,
}

impl RenderableSeverity {
    pub(crate) fn label(self) -> &'static str {
        match self {
            RenderableSeverity::Info => "INFO",
            RenderableSeverity::Warning => "WARN",
            RenderableSeverity::Error => "ERROR",
        }
    }
}

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum RenderableVerdictStatus {
    Pass,
    Warn,
    Fail,
}

impl RenderableVerdictStatus {
    pub(crate) fn label(self) -> &'static str {
        match self {
            RenderableVerdictStatus::Pass => "PASS",
            RenderableVerdictStatus::Warn => "WARN",
            RenderableVerdictStatus::Fail => "FAIL",
        }
    }
}

#[derive(Clone, Debug, PartialEq, Eq)]
pub struct RenderableFinding {
    pub severity: RenderableSeverity,
    pub check_id: String,
    pub code: String,
    pub message: String,
    pub package: Option<String>,
    pub details: Option<String>,
    pub help: Option<String>,
}

#[derive(Clone, Debug, PartialEq, Eq)]
pub struct RenderableData {
    pub lockfile: String,
    pub lockfile_version: u32,
    pub packages_scanned: u32,
    pub strict: bool,
    pub errors: u32,
    pub warnings: u32,
    pub info: u32,
}

#[derive(Clone, Debug, PartialEq, Eq)]
pub struct RenderableReport {
    pub verdict: RenderableVerdictStatus,
    pub passed: bool,
    pub findings: Vec<RenderableFinding>,
    pub data: RenderableData,
}

//! Mode session state machine
//!
//! The shell starts `Idle`. A `start <mode>` command enters a mode, which
//! runs its own dispatch loop over a mode-specific vocabulary until the user
//! says "exit". Only the top level knows the process-wide exit.

use std::fmt;

use crate::router::CommandTable;

/// Spoken before the profile questions on the first-ever ERP entry
pub const ERP_ONBOARDING: &str = "Starting ERP system. This is your first time using the ERP system. Please provide the following details about your business.";

/// Spoken on the first ERP entry of a run
pub const ERP_WELCOME: &str =
    "Thank you for providing the details. The ERP system is now started. What would you like to do next?";

/// Spoken on later ERP entries in the same run
pub const ERP_ALREADY_IN_USE: &str = "ERP system is already in use. What would you like to do next?";

/// Spoken when the profile cannot be loaded or collected
pub const PROFILE_FAILURE: &str = "I could not open your business profile.";

/// Spoken for input outside the active mode's vocabulary
pub const NOT_RECOGNIZED: &str = "Command not recognized. Please try again.";

/// A business mode with its own vocabulary
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Mode {
    /// Enterprise resource planning
    Erp,
    /// Financial services
    FinTech,
    /// Personal assistant
    PersonalAi,
    /// Healthcare robot
    HealthcareRobot,
}

impl Mode {
    /// Human-readable name used in speech
    #[must_use]
    pub const fn name(self) -> &'static str {
        match self {
            Self::Erp => "ERP",
            Self::FinTech => "FinTech",
            Self::PersonalAi => "Personal AI",
            Self::HealthcareRobot => "Healthcare Robot",
        }
    }

    /// Line spoken on entering the mode
    ///
    /// ERP's welcome depends on the session and profile, see the shell.
    #[must_use]
    pub const fn welcome(self) -> &'static str {
        match self {
            Self::Erp => ERP_WELCOME,
            Self::FinTech => "Starting FinTech system. What would you like to do next?",
            Self::PersonalAi => "Starting Personal AI system. How can I assist you today?",
            Self::HealthcareRobot => "Starting Healthcare Robot system. How can I assist you today?",
        }
    }

    /// Line spoken on leaving the mode
    #[must_use]
    pub fn farewell(self) -> String {
        format!("Leaving {}.", self.name())
    }

    /// The mode's command table, exit first
    #[must_use]
    pub fn table(self) -> CommandTable<ModeAction> {
        let acknowledgments: &[(&'static str, &'static str)] = match self {
            Self::Erp => ERP_COMMANDS,
            Self::FinTech => FINTECH_COMMANDS,
            Self::PersonalAi => PERSONAL_AI_COMMANDS,
            Self::HealthcareRobot => HEALTHCARE_COMMANDS,
        };

        let mut table = CommandTable::new().with("exit", ModeAction::Leave);
        for &(keyword, reply) in acknowledgments {
            table.push(keyword, ModeAction::Acknowledge(reply));
        }
        table.with("open site", ModeAction::OpenSite)
    }
}

impl fmt::Display for Mode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

/// What a mode command does
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ModeAction {
    /// Return to the top level
    Leave,
    /// Speak a fixed acknowledgment
    Acknowledge(&'static str),
    /// Open the configured site
    OpenSite,
}

/// Where the session currently is
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum SessionState {
    /// Top-level vocabulary
    #[default]
    Idle,
    /// Inside a mode's loop
    InMode(Mode),
}

/// Per-process session context
///
/// `erp_system_used` lives only as long as the process: a restart speaks the
/// ERP welcome again even when the profile is already stored.
#[derive(Debug, Clone, Default)]
pub struct Session {
    state: SessionState,
    erp_system_used: bool,
}

impl Session {
    /// Fresh idle session
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Current state
    #[must_use]
    pub const fn state(&self) -> SessionState {
        self.state
    }

    /// Whether ERP has been entered successfully in this run
    #[must_use]
    pub const fn erp_system_used(&self) -> bool {
        self.erp_system_used
    }

    /// Record the first successful ERP entry
    pub const fn mark_erp_used(&mut self) {
        self.erp_system_used = true;
    }

    /// Enter a mode
    pub fn enter(&mut self, mode: Mode) {
        tracing::info!(mode = %mode, "entering mode");
        self.state = SessionState::InMode(mode);
    }

    /// Return to the top level
    pub fn leave(&mut self) {
        if let SessionState::InMode(mode) = self.state {
            tracing::info!(mode = %mode, "leaving mode");
        }
        self.state = SessionState::Idle;
    }
}

const ERP_COMMANDS: &[(&str, &str)] = &[
    ("manage employee records", "Managing employee records."),
    ("handle recruitment", "Handling recruitment."),
    ("manage performance reviews", "Managing performance reviews."),
    ("track attendance", "Tracking attendance."),
    ("manage financial records", "Managing financial records."),
    ("generate financial reports", "Generating financial reports."),
    ("track expenses", "Tracking expenses."),
    ("create budgets", "Creating budgets."),
    ("manage customer data", "Managing customer data."),
    ("track customer interactions", "Tracking customer interactions."),
    ("handle customer support", "Handling customer support."),
    ("manage projects", "Managing projects."),
    ("assign tasks", "Assigning tasks."),
    ("set deadlines", "Setting deadlines."),
    ("track milestones", "Tracking milestones."),
    ("manage supply chain", "Managing supply chain."),
    ("track shipments", "Tracking shipments."),
    ("manage vendors", "Managing vendors."),
    ("perform business analytics", "Performing business analytics."),
    ("generate dashboards", "Generating dashboards."),
    ("predict trends", "Predicting trends."),
    ("manage documents", "Managing documents."),
    ("track approvals", "Tracking approvals."),
    ("archive records", "Archiving records."),
    ("handle compliance", "Handling compliance."),
];

const FINTECH_COMMANDS: &[(&str, &str)] = &[
    ("manage investments", "Managing investments."),
    ("track portfolio", "Tracking portfolio."),
    ("analyze market trends", "Analyzing market trends."),
    ("generate investment reports", "Generating investment reports."),
    ("provide financial advice", "Providing financial advice."),
    ("monitor stocks", "Monitoring stocks."),
];

const PERSONAL_AI_COMMANDS: &[(&str, &str)] = &[
    ("set reminders", "Setting reminders."),
    ("manage calendar", "Managing calendar."),
    ("provide daily tips", "Providing daily tips."),
    ("organize tasks", "Organizing tasks."),
    ("track goals", "Tracking goals."),
    ("offer productivity suggestions", "Offering productivity suggestions."),
];

const HEALTHCARE_COMMANDS: &[(&str, &str)] = &[
    ("track health metrics", "Tracking health metrics."),
    ("manage medication", "Managing medication."),
    ("provide health tips", "Providing health tips."),
    ("schedule doctor appointments", "Scheduling doctor appointments."),
    ("monitor fitness", "Monitoring fitness."),
    ("offer wellness advice", "Offering wellness advice."),
];

use std::fmt;

/// How many downgradable warnings `--force` lets through.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum ForceLevel {
    /// No `--force`: every downgradable check is fatal.
    #[default]
    Disabled,
    /// Ignore up to N warnings.
    Limited(u32),
    /// `--force=-1`: ignore every warning.
    Unlimited,
}

impl fmt::Display for ForceLevel {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ForceLevel::Disabled => write!(f, "false"),
            ForceLevel::Limited(n) => write!(f, "{}", n),
            ForceLevel::Unlimited => write!(f, "-1"),
        }
    }
}

impl std::str::FromStr for ForceLevel {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "" | "true" => Ok(ForceLevel::Limited(1)),
            "false" => Ok(ForceLevel::Disabled),
            "-1" => Ok(ForceLevel::Unlimited),
            _ => {
                let level: i64 = s.parse().map_err(|_| {
                    format!("invalid force level '{}', must be a number or -1 for unlimited", s)
                })?;
                if level < 0 {
                    return Err(format!(
                        "invalid force level '{}', must be 0 or positive, or -1 for unlimited",
                        level
                    ));
                }
                u32::try_from(level)
                    .map(ForceLevel::Limited)
                    .map_err(|_| format!("invalid force level '{}', value is too large", s))
            }
        }
    }
}

/// Capacity left in a [`WarningBudget`].
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Remaining {
    Count(u32),
    Unlimited,
}

impl fmt::Display for Remaining {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Remaining::Count(n) => write!(f, "{}", n),
            Remaining::Unlimited => write!(f, "unlimited"),
        }
    }
}

/// Counter of warnings downgraded from fatal to advisory.
///
/// One budget lives for the whole run and is threaded through every check
/// by `&mut`. Checks call [`WarningBudget::try_consume`] when they fire; a
/// `true` result means "print an advisory and carry on", `false` means the
/// check must fail the run.
#[derive(Debug, Clone, Default)]
pub struct WarningBudget {
    level: ForceLevel,
    used: u32,
}

impl WarningBudget {
    pub fn new(level: ForceLevel) -> Self {
        Self { level, used: 0 }
    }

    pub fn level(&self) -> ForceLevel {
        self.level
    }

    /// Number of warnings that were let through so far.
    pub fn used(&self) -> u32 {
        self.used
    }

    pub fn remaining(&self) -> Remaining {
        match self.level {
            ForceLevel::Disabled => Remaining::Count(0),
            ForceLevel::Limited(n) => Remaining::Count(n.saturating_sub(self.used)),
            ForceLevel::Unlimited => Remaining::Unlimited,
        }
    }

    /// Spend one unit if any is left.
    pub fn try_consume(&mut self) -> bool {
        match self.remaining() {
            Remaining::Unlimited => {
                self.used = self.used.saturating_add(1);
                true
            }
            Remaining::Count(0) => false,
            Remaining::Count(_) => {
                self.used += 1;
                true
            }
        }
    }
}

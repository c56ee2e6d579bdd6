pub mod columns;

use crate::errors::Error;
use std::collections::HashSet;
use std::path::PathBuf;
use std::str::FromStr;

/// How a column that already holds a value reacts to a new value for the same flow
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum MergePolicy {
    /// Keep the first non-null value seen
    FirstWins,
    /// Every non-null value overwrites the previous one
    LastWins,
}

impl std::fmt::Display for MergePolicy {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::FirstWins => write!(f, "first"),
            Self::LastWins => write!(f, "last"),
        }
    }
}

impl FromStr for MergePolicy {
    type Err = Error;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "first" | "first-wins" => Ok(Self::FirstWins),
            "last" | "last-wins" => Ok(Self::LastWins),
            other => Err(Error::Config {
                msg: format!("Unknown merge policy '{}', expected first or last", other),
            }),
        }
    }
}

/// How `metadata.flowbits` is rendered
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum FlowbitsMode {
    /// Number of flowbits, in `flowbits_count`
    Count,
    /// Flowbits joined with `,`, in `flowbits`
    Joined,
}

impl FlowbitsMode {
    pub fn column(&self) -> &'static str {
        match self {
            Self::Count => columns::FLOWBITS_COUNT,
            Self::Joined => columns::FLOWBITS,
        }
    }
}

impl std::fmt::Display for FlowbitsMode {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::Count => write!(f, "count"),
            Self::Joined => write!(f, "joined"),
        }
    }
}

impl FromStr for FlowbitsMode {
    type Err = Error;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "count" => Ok(Self::Count),
            "joined" | "join" => Ok(Self::Joined),
            other => Err(Error::Config {
                msg: format!("Unknown flowbits mode '{}', expected count or joined", other),
            }),
        }
    }
}

/// Which columns end up in the output
#[derive(Clone, Debug, PartialEq, Eq)]
pub enum ColumnSet {
    /// Exactly these columns, in this order. Missing cells render empty.
    Fixed(Vec<String>),
    /// `flow_id`, then every column any flow populated, sorted
    Union,
}

impl ColumnSet {
    pub fn policy(&self) -> ColumnPolicy {
        match self {
            Self::Fixed(_) => ColumnPolicy::Fixed,
            Self::Union => ColumnPolicy::Union,
        }
    }
}

/// The kind of a `ColumnSet`, as chosen on the command line
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum ColumnPolicy {
    Fixed,
    Union,
}

impl std::fmt::Display for ColumnPolicy {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::Fixed => write!(f, "fixed"),
            Self::Union => write!(f, "union"),
        }
    }
}

impl FromStr for ColumnPolicy {
    type Err = Error;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "fixed" => Ok(Self::Fixed),
            "union" => Ok(Self::Union),
            other => Err(Error::Config {
                msg: format!("Unknown column policy '{}', expected fixed or union", other),
            }),
        }
    }
}

/// Configuration options for a conversion run
#[derive(Clone, Debug)]
pub struct Config {
    /// Eve json lines file to read, defaults to eve.json
    pub input: PathBuf,
    /// CSV file to write, defaults to flows.csv
    pub output: PathBuf,
    /// Merge policy for the top level fields shared by every event (addresses, ports, protocol,
    /// timestamp, interface). Defaults to first wins.
    pub common_policy: MergePolicy,
    /// Merge policy for fields pulled from the flow, alert, http and tcp sections. Defaults to
    /// last wins.
    pub event_policy: MergePolicy,
    /// How flowbits are rendered
    pub flowbits: FlowbitsMode,
    /// Output columns
    pub columns: ColumnSet,
}

impl Default for Config {
    fn default() -> Self {
        Config {
            input: PathBuf::from("eve.json"),
            output: PathBuf::from("flows.csv"),
            common_policy: MergePolicy::FirstWins,
            event_policy: MergePolicy::LastWins,
            flowbits: FlowbitsMode::Count,
            columns: ColumnSet::Fixed(columns::default_columns(FlowbitsMode::Count)),
        }
    }
}

impl Config {
    pub fn validate(&self) -> Result<(), Error> {
        if let ColumnSet::Fixed(ref list) = self.columns {
            if list.is_empty() {
                return Err(Error::Config {
                    msg: "Fixed column list is empty".into(),
                });
            }
            let mut seen = HashSet::with_capacity(list.len());
            for column in list {
                if !seen.insert(column.as_str()) {
                    return Err(Error::Config {
                        msg: format!("Column '{}' listed more than once", column),
                    });
                }
            }
            let unused = match self.flowbits {
                FlowbitsMode::Count => FlowbitsMode::Joined.column(),
                FlowbitsMode::Joined => FlowbitsMode::Count.column(),
            };
            if seen.contains(unused) {
                return Err(Error::Config {
                    msg: format!(
                        "Column '{}' is never written when flowbits are {}, use '{}'",
                        unused,
                        self.flowbits,
                        self.flowbits.column()
                    ),
                });
            }
        }
        Ok(())
    }
}

//! Lifecycle status enums stored as lowercase text columns.
//!
//! Each variant maps to the string stored in the database and used on the
//! wire (`snake_case`). The `CHECK` constraints in the migrations list the
//! same values.

use crate::error::CoreError;

macro_rules! define_status_enum {
    (
        $(#[$meta:meta])*
        $name:ident {
            $( $(#[$vmeta:meta])* $variant:ident = $text:literal ),+ $(,)?
        }
    ) => {
        $(#[$meta])*
        #[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, serde::Serialize, serde::Deserialize)]
        #[serde(rename_all = "snake_case")]
        pub enum $name {
            $( $(#[$vmeta])* $variant ),+
        }

        impl $name {
            /// Every variant, in declaration order.
            pub const ALL: &'static [$name] = &[$( $name::$variant ),+];

            /// The text stored in the database.
            pub fn as_str(self) -> &'static str {
                match self {
                    $( $name::$variant => $text ),+
                }
            }
        }

        impl std::fmt::Display for $name {
            fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
                f.write_str(self.as_str())
            }
        }

        impl std::str::FromStr for $name {
            type Err = CoreError;

            fn from_str(s: &str) -> Result<Self, Self::Err> {
                match s {
                    $( $text => Ok($name::$variant), )+
                    other => Err(CoreError::Validation(format!(
                        "Invalid {} '{other}'. Must be one of: {}",
                        stringify!($name),
                        [$( $text ),+].join(", ")
                    ))),
                }
            }
        }
    };
}

define_status_enum! {
    /// Budget proposal lifecycle.
    ProposalStatus {
        /// Initial state of every proposal.
        Opportunity = "opportunity",
        /// The client accepted the quote.
        Awarded = "awarded",
        Rejected = "rejected",
    }
}

define_status_enum! {
    /// Construction project lifecycle.
    ProjectStatus {
        /// Initial state of every project.
        NotStarted = "not_started",
        InProgress = "in_progress",
        Completed = "completed",
    }
}

impl Default for ProposalStatus {
    fn default() -> Self {
        ProposalStatus::Opportunity
    }
}

impl Default for ProjectStatus {
    fn default() -> Self {
        ProjectStatus::NotStarted
    }
}

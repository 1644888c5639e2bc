//! Use cases orchestrating domain logic against the ports.

pub mod manage_agenda;
pub mod manage_bills;
pub mod manage_roster;
pub mod migrate_legacy_names;
pub mod record_roll_call;
pub mod shared;
pub mod sync_directory;

pub use manage_agenda::{ManageAgendaError, ManageAgendaUseCase, SaveAgendaInput};
pub use manage_bills::{ManageBillsError, ManageBillsUseCase, SubmitBillInput};
pub use manage_roster::{ManageRosterError, ManageRosterUseCase, SubmitRepresentativeInput};
pub use migrate_legacy_names::{MigrateLegacyNamesUseCase, MigrationError, MigrationReport};
pub use record_roll_call::{RecordRollCallUseCase, RollCallError};
pub use sync_directory::{SyncDirectoryUseCase, SyncError};

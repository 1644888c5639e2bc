//! Application layer for duma-register
//!
//! This crate defines the ports the chamber's external collaborators must
//! implement (document store, change feed, identity, audit log, status
//! notices) and the use cases that orchestrate the domain against them.
//!
//! The persistence policy throughout is optimistic-always: use cases mutate
//! the live local directory first, then attempt the remote write; a failure
//! surfaces as a user-visible notice and is never rolled back.

pub mod config;
pub mod directory;
pub mod ports;
pub mod use_cases;

// Re-export commonly used types
pub use config::{AdminCredentials, DeploymentConfig, SessionPolicy};
pub use directory::{Directory, SharedDirectory};
pub use ports::{
    AuditEvent, AuditLog, AuthError, ChangeEvent, ChangeFeed, ChangeStream, Collection,
    DocumentStore, IdentityGateway, NoAuditLog, NoNotices, NoticeLevel, Session, SessionKind,
    StatusNotifier, StoreError,
};
pub use use_cases::{
    ManageAgendaError, ManageAgendaUseCase, ManageBillsError, ManageBillsUseCase,
    ManageRosterError, ManageRosterUseCase, MigrateLegacyNamesUseCase, MigrationError,
    MigrationReport, RecordRollCallUseCase, RollCallError, SaveAgendaInput, SubmitBillInput,
    SubmitRepresentativeInput, SyncDirectoryUseCase, SyncError,
};
pub use use_cases::shared::{DELETE_FAILED_NOTICE, SAVE_FAILED_NOTICE};

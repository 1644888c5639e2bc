//! Interactive admin shell.
//!
//! The editing surface of the register: signs in once, then drives the admin
//! use cases from a readline loop. Reads render through the same formatters
//! as the one-shot CLI commands, so what an admin sees is exactly what the
//! public views show.

use crate::output::{ConsoleFormatter, ConsoleNotifier};
use colored::Colorize;
use duma_application::{
    AuditLog, DocumentStore, ManageAgendaUseCase, ManageBillsUseCase, ManageRosterUseCase,
    MigrateLegacyNamesUseCase, RecordRollCallUseCase, SaveAgendaInput, Session, SharedDirectory,
    SubmitBillInput, SubmitRepresentativeInput,
};
use duma_domain::{
    AgendaLineItem, BallotChoice, BillStatus, BusinessItem, LeadershipPost, Party, RawBallotText,
    Region, RichText,
};
use rustyline::error::ReadlineError;
use rustyline::{DefaultEditor, Result as RlResult};
use std::str::FromStr;
use std::sync::Arc;

/// Interactive admin shell over the chamber's use cases
pub struct AdminShell<S: DocumentStore + 'static> {
    directory: SharedDirectory,
    bills: ManageBillsUseCase<S>,
    roster_admin: ManageRosterUseCase<S>,
    agenda_admin: ManageAgendaUseCase<S>,
    roll_calls: RecordRollCallUseCase<S>,
    migration: MigrateLegacyNamesUseCase<S>,
    session: Session,
}

impl<S: DocumentStore + 'static> AdminShell<S> {
    /// Build the shell and its use cases around one store and directory.
    pub fn new(
        store: Arc<S>,
        directory: SharedDirectory,
        audit: Arc<dyn AuditLog>,
        session: Session,
    ) -> Self {
        let notices: Arc<ConsoleNotifier> = Arc::new(ConsoleNotifier);
        Self {
            bills: ManageBillsUseCase::new(store.clone(), directory.clone())
                .with_audit(audit.clone())
                .with_notices(notices.clone()),
            roster_admin: ManageRosterUseCase::new(store.clone(), directory.clone())
                .with_audit(audit.clone())
                .with_notices(notices.clone()),
            agenda_admin: ManageAgendaUseCase::new(store.clone(), directory.clone())
                .with_audit(audit.clone())
                .with_notices(notices.clone()),
            roll_calls: RecordRollCallUseCase::new(store.clone(), directory.clone())
                .with_audit(audit.clone())
                .with_notices(notices),
            migration: MigrateLegacyNamesUseCase::new(store).with_audit(audit),
            directory,
            session,
        }
    }

    /// Run the interactive loop until quit or EOF.
    pub async fn run(&self) -> RlResult<()> {
        let mut rl = DefaultEditor::new()?;

        // Try to load history
        let history_path = dirs::data_dir().map(|p| p.join("duma-register").join("history.txt"));

        if let Some(ref path) = history_path {
            if let Some(parent) = path.parent() {
                let _ = std::fs::create_dir_all(parent);
            }
            let _ = rl.load_history(path);
        }

        self.print_welcome();

        loop {
            let readline = rl.readline("duma> ");

            match readline {
                Ok(line) => {
                    let line = line.trim().to_string();
                    if line.is_empty() {
                        continue;
                    }
                    let _ = rl.add_history_entry(&line);
                    if self.dispatch(&mut rl, &line).await {
                        break;
                    }
                }
                Err(ReadlineError::Interrupted) => {
                    println!("^C");
                    continue;
                }
                Err(ReadlineError::Eof) => {
                    println!("Bye!");
                    break;
                }
                Err(err) => {
                    eprintln!("Error: {:?}", err);
                    break;
                }
            }
        }

        // Save history
        if let Some(ref path) = history_path {
            let _ = rl.save_history(path);
        }

        Ok(())
    }

    fn print_welcome(&self) {
        println!();
        println!("╭─────────────────────────────────────────────╮");
        println!("│        duma-register - Admin Shell          │");
        println!("╰─────────────────────────────────────────────╯");
        println!();
        println!("Signed in as {} until {}", self.session.user_id.bold(), self.session.expires_at.format("%H:%M UTC"));
        println!("Type `help` for commands, `quit` to leave.");
        println!();
    }

    fn print_help(&self) {
        println!();
        println!("Reading:");
        println!("  list bills | list reps | list agenda | leadership");
        println!("  show <bill-id>");
        println!();
        println!("Bills:");
        println!("  add bill            - prompted entry");
        println!("  edit bill <id>      - prompted re-entry (empty vote text keeps the record)");
        println!("  delete bill <id>");
        println!();
        println!("Roll-calls:");
        println!("  vote <bill-id> <aye|nay|abstain> <name>  - toggle one voter");
        println!("  votes <bill-id>                          - prompted bulk text entry");
        println!();
        println!("Roster:");
        println!("  add rep | edit rep <id> | delete rep <id>");
        println!();
        println!("Agenda:");
        println!("  add agenda | delete agenda <id>");
        println!();
        println!("Maintenance:");
        println!("  migrate             - rewrite legacy name-keyed records to ids");
        println!("  help | quit");
        println!();
    }

    /// Handle one command line. Returns true when the shell should exit.
    async fn dispatch(&self, rl: &mut DefaultEditor, line: &str) -> bool {
        let words: Vec<&str> = line.split_whitespace().collect();
        match words.as_slice() {
            ["quit"] | ["exit"] | ["q"] => {
                println!("Bye!");
                return true;
            }
            ["help"] | ["h"] | ["?"] => self.print_help(),

            ["list", "bills"] => {
                let dir = self.directory.read().await;
                let bills: Vec<_> = dir.bills.iter().collect();
                println!("{}", ConsoleFormatter::format_bill_list(&bills, true));
            }
            ["list", "reps"] => {
                let dir = self.directory.read().await;
                let reps: Vec<_> = dir.representatives.iter().collect();
                println!("{}", ConsoleFormatter::format_representatives(&reps, &dir.leadership));
            }
            ["list", "agenda"] => {
                let dir = self.directory.read().await;
                println!("{}", ConsoleFormatter::format_agenda(&dir.agenda));
            }
            ["leadership"] => {
                let dir = self.directory.read().await;
                println!("{}", ConsoleFormatter::format_leadership(&dir.leadership, &dir.roster()));
            }
            ["show", id] => {
                let dir = self.directory.read().await;
                match dir.bill(id) {
                    Some(bill) => println!("{}", ConsoleFormatter::format_bill_detail(bill, &dir.roster())),
                    None => eprintln!("Unknown bill: {id}"),
                }
            }

            ["add", "bill"] => self.submit_bill(rl, None).await,
            ["edit", "bill", id] => self.submit_bill(rl, Some(id.to_string())).await,
            ["delete", "bill", id] => {
                if confirm(rl, "Are you sure you want to delete this bill?") {
                    report(self.bills.delete(&self.session, id).await);
                }
            }

            ["vote", bill_id, choice, name @ ..] if !name.is_empty() => {
                match BallotChoice::from_str(choice) {
                    Ok(choice) => {
                        let voter = name.join(" ");
                        match self.roll_calls.toggle(&self.session, bill_id, &voter, choice).await {
                            Ok(tally) => println!("{}", tally.summary().bold()),
                            Err(e) => eprintln!("{e}"),
                        }
                    }
                    Err(e) => eprintln!("{e}"),
                }
            }
            ["votes", bill_id] => self.submit_vote_text(rl, bill_id).await,

            ["add", "rep"] => self.submit_rep(rl, None).await,
            ["edit", "rep", id] => self.submit_rep(rl, Some(id.to_string())).await,
            ["delete", "rep", id] => {
                if confirm(rl, "Are you sure you want to delete this representative?") {
                    report(self.roster_admin.delete(&self.session, id).await);
                }
            }

            ["add", "agenda"] => self.submit_agenda(rl).await,
            ["delete", "agenda", id] => {
                if confirm(rl, "Delete this agenda?") {
                    report(self.agenda_admin.delete(&self.session, id).await);
                }
            }

            ["migrate"] => match self.migration.execute(&self.session).await {
                Ok(migration) => {
                    println!(
                        "{} bill(s) rewritten, {} leadership entr(ies) relinked",
                        migration.bills_rewritten, migration.leadership_relinked
                    );
                    if !migration.unmatched_names.is_empty() {
                        println!(
                            "{} {}",
                            "Unmatched names:".yellow(),
                            migration.unmatched_names.join(", ")
                        );
                    }
                }
                Err(e) => eprintln!("{e}"),
            },

            _ => {
                println!("Unknown command: {line}");
                println!("Type `help` for available commands");
            }
        }
        false
    }

    async fn submit_bill(&self, rl: &mut DefaultEditor, id: Option<String>) {
        let Some(title) = prompt(rl, "Title") else { return };
        let Some(status) = prompt_parse::<BillStatus>(rl, "Status", BillStatus::ALL.map(|s| s.label())) else {
            return;
        };
        let Some(kind) = prompt(rl, "Bill type") else { return };
        let Some(date) = prompt(rl, "Date introduced (YYYY-MM-DD)") else { return };
        let Some(sponsor) = prompt(rl, "Sponsor") else { return };
        let latest_action = prompt(rl, "Latest action").unwrap_or_default();
        let document_link = prompt(rl, "Document link (optional)");

        println!("Vote breakdown (comma-separated names; leave empty to keep existing):");
        let ballot_text = read_ballot_text(rl);

        let mut input = SubmitBillInput::new(title, status, kind, date, sponsor)
            .with_latest_action(latest_action)
            .with_ballot_text(ballot_text);
        if let Some(link) = document_link {
            input = input.with_document_link(link);
        }
        if let Some(id) = id {
            input = input.editing(id);
        }
        report(self.bills.submit(&self.session, input).await.map(|bill| {
            println!("{}", bill.id.to_string().dimmed());
        }));
    }

    async fn submit_vote_text(&self, rl: &mut DefaultEditor, bill_id: &str) {
        println!("Comma-separated names; leave a field empty to keep what is recorded:");
        let raw = read_ballot_text(rl);
        match self.roll_calls.submit_text(&self.session, bill_id, &raw).await {
            Ok(tally) => println!("{}", tally.summary().bold()),
            Err(e) => eprintln!("{e}"),
        }
    }

    async fn submit_rep(&self, rl: &mut DefaultEditor, id: Option<String>) {
        let Some(name) = prompt(rl, "Name") else { return };
        let Some(party) = prompt_parse::<Party>(rl, "Party", Party::ALL.map(|p| p.label())) else {
            return;
        };
        let Some(region) = prompt_parse::<Region>(rl, "Region", Region::ALL.map(|r| r.label())) else {
            return;
        };
        let image = prompt(rl, "Image URL (optional)");
        let post = prompt_parse::<LeadershipPost>(
            rl,
            "Leadership role (optional)",
            LeadershipPost::ALL.map(|p| p.title()),
        );
        let bio = match post {
            Some(_) => prompt(rl, "Bio").unwrap_or_default(),
            None => String::new(),
        };

        let mut input = SubmitRepresentativeInput::new(name, party, region).with_bio(bio);
        if let Some(url) = image {
            input = input.with_image(url);
        }
        if let Some(post) = post {
            input = input.with_leadership_role(post);
        }
        if let Some(id) = id {
            input = input.editing(id);
        }
        report(self.roster_admin.submit(&self.session, input).await.map(|rep| {
            println!("{}", rep.id.to_string().dimmed());
        }));
    }

    async fn submit_agenda(&self, rl: &mut DefaultEditor) {
        let Some(date) = prompt(rl, "Date") else { return };
        let mut input = SaveAgendaInput::new(date);

        while confirm(rl, "Add a business item?") {
            let Some(time) = prompt(rl, "  Time") else { break };
            let Some(title) = prompt(rl, "  Title") else { break };
            let text = prompt(rl, "  Text (markup kept verbatim)").unwrap_or_default();
            let mut item = BusinessItem {
                time,
                title,
                text: RichText::new(text),
                items: Vec::new(),
            };
            while confirm(rl, "  Add a bill under review?") {
                let Some(name) = prompt(rl, "    Bill name") else { break };
                let details = prompt(rl, "    Details").unwrap_or_default();
                item.items.push(AgendaLineItem { name, details });
            }
            input = input.with_business(item);
        }
        report(self.agenda_admin.save(&self.session, input).await.map(|day| {
            println!("{}", day.id.to_string().dimmed());
        }));
    }
}

/// Read one non-empty line; `None` on empty input or EOF.
fn prompt(rl: &mut DefaultEditor, label: &str) -> Option<String> {
    match rl.readline(&format!("{label}: ")) {
        Ok(line) => {
            let line = line.trim().to_string();
            if line.is_empty() { None } else { Some(line) }
        }
        Err(_) => None,
    }
}

/// Prompt until the input parses or is left empty.
fn prompt_parse<T: FromStr>(
    rl: &mut DefaultEditor,
    label: &str,
    options: impl IntoIterator<Item = &'static str>,
) -> Option<T>
where
    T::Err: std::fmt::Display,
{
    let options: Vec<&str> = options.into_iter().collect();
    println!("  ({})", options.join(" | "));
    loop {
        let raw = prompt(rl, label)?;
        match raw.parse::<T>() {
            Ok(value) => return Some(value),
            Err(e) => eprintln!("{e}"),
        }
    }
}

fn confirm(rl: &mut DefaultEditor, question: &str) -> bool {
    matches!(
        prompt(rl, &format!("{question} [y/N]")).as_deref(),
        Some("y") | Some("Y") | Some("yes")
    )
}

fn read_ballot_text(rl: &mut DefaultEditor) -> RawBallotText {
    RawBallotText::new()
        .with_ayes(prompt(rl, "Ayes").unwrap_or_default())
        .with_nays(prompt(rl, "Nays").unwrap_or_default())
        .with_abstain(prompt(rl, "Abstain").unwrap_or_default())
        .with_absent(prompt(rl, "Absent").unwrap_or_default())
}

fn report<T, E: std::fmt::Display>(result: Result<T, E>) {
    if let Err(e) = result {
        eprintln!("{e}");
    }
}

/// Prompt for missing credentials before the shell starts.
pub fn prompt_credentials(
    username: Option<String>,
    password: Option<String>,
) -> RlResult<(String, String)> {
    let mut rl = DefaultEditor::new()?;
    let username = match username {
        Some(u) => u,
        None => rl.readline("Username: ")?.trim().to_string(),
    };
    let password = match password {
        Some(p) => p,
        None => rl.readline("Password: ")?.trim().to_string(),
    };
    Ok((username, password))
}

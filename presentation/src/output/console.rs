//! Console output formatting

use colored::{Color, ColoredString, Colorize};
use duma_domain::{
    summarize, AgendaDay, BallotChoice, Bill, BillStatus, LeadershipBoard, LeadershipPost, Party,
    Representative, Roster,
};
use serde::Serialize;

/// Formats domain data for console display
pub struct ConsoleFormatter;

impl ConsoleFormatter {
    /// One-line-per-bill activity listing.
    pub fn format_bill_list(bills: &[&Bill], searching: bool) -> String {
        if bills.is_empty() {
            return if searching {
                "No bills found matching your search criteria.".to_string()
            } else {
                "No active bills found.".to_string()
            };
        }

        let mut out = String::new();
        for bill in bills {
            out.push_str(&format!(
                "{}  {}\n    {}  {}  {}\n",
                bill.id.to_string().dimmed(),
                bill.title.bold(),
                Self::status_badge(bill.status),
                bill.date.dimmed(),
                bill.kind,
            ));
        }
        out.push_str(&format!("\n{} bill(s)", bills.len()));
        out
    }

    /// Full bill card with the roll-call breakdown.
    pub fn format_bill_detail(bill: &Bill, roster: &Roster) -> String {
        let tally = summarize(&bill.vote, roster);
        let mut out = String::new();

        out.push_str(&format!("{}\n", bill.title.bold()));
        out.push_str(&format!("{}\n\n", bill.id.to_string().dimmed()));
        out.push_str(&format!("Status:        {}\n", Self::status_badge(bill.status)));
        out.push_str(&format!("Introduced:    {}\n", bill.date));
        out.push_str(&format!("Sponsor:       {}\n", bill.sponsor));
        out.push_str(&format!("Type:          {}\n", bill.kind));
        out.push_str(&format!("Latest action: {}\n", bill.latest_action));
        if let Some(link) = &bill.document_link {
            out.push_str(&format!("Document:      {}\n", link.underline()));
        }
        out.push_str(&format!("Vote result:   {}\n", tally.summary().bold()));
        if !tally.absent_derived && !tally.is_roster_consistent() {
            out.push_str(
                &format!(
                    "               {}\n",
                    "recorded absent list does not account for the current roster".yellow()
                ),
            );
        }

        let sections: [(&str, Color, Vec<String>); 4] = [
            ("Ayes", Color::Green, bill.vote.display_names(roster, BallotChoice::Aye)),
            ("Nays", Color::Red, bill.vote.display_names(roster, BallotChoice::Nay)),
            ("Abstain", Color::Yellow, bill.vote.display_names(roster, BallotChoice::Abstain)),
            ("Absent", Color::BrightBlack, bill.vote.absent_display_names(roster)),
        ];
        if sections.iter().all(|(_, _, names)| names.is_empty()) {
            out.push_str("\nNo vote data available\n");
        } else {
            out.push('\n');
            for (label, color, names) in sections {
                if names.is_empty() {
                    continue;
                }
                out.push_str(&format!(
                    "{} ({})\n    {}\n",
                    label.color(color).bold(),
                    names.len(),
                    names.join(", ")
                ));
            }
        }
        out
    }

    /// Representative directory listing, with leadership badges.
    pub fn format_representatives(reps: &[&Representative], board: &LeadershipBoard) -> String {
        if reps.is_empty() {
            return "No representatives found matching your criteria.".to_string();
        }

        let mut out = String::new();
        for rep in reps {
            let badge = board
                .post_of(&rep.id)
                .map(|post| format!("  {}", post.title().to_uppercase().on_yellow().black()))
                .unwrap_or_default();
            out.push_str(&format!(
                "{}{}\n    {}  {}\n",
                rep.name.bold(),
                badge,
                Self::party_badge(rep.party),
                rep.region,
            ));
        }
        out.push_str(&format!("\n{} representative(s)", reps.len()));
        out
    }

    /// The three leadership posts, resolved against the roster.
    pub fn format_leadership(board: &LeadershipBoard, roster: &Roster) -> String {
        let mut out = String::new();
        for post in LeadershipPost::ALL {
            out.push_str(&format!("{}\n", post.title().to_uppercase().bold()));
            match board.get(post) {
                Some(entry) => {
                    let region = board
                        .region_of(post, roster)
                        .map(|r| r.to_string())
                        .unwrap_or_else(|| "N/A".to_string());
                    out.push_str(&format!(
                        "    {}  {}  {}\n",
                        entry.name,
                        Self::party_badge(entry.party),
                        region.dimmed(),
                    ));
                    if !entry.bio.is_empty() {
                        out.push_str(&format!("    {}\n", entry.bio.dimmed()));
                    }
                }
                None => out.push_str(&format!("    {}\n", "N/A".dimmed())),
            }
            out.push('\n');
        }
        out.trim_end().to_string()
    }

    /// Order-of-business agendas, earliest first as stored.
    pub fn format_agenda(days: &[AgendaDay]) -> String {
        if days.is_empty() {
            return "No upcoming work.".to_string();
        }

        let mut out = String::new();
        for day in days {
            out.push_str(&format!(
                "{} {}\n",
                "ORDER OF BUSINESS -".bold(),
                day.date.bold()
            ));
            for item in &day.business {
                out.push_str(&format!("  {}: {}\n", item.time, item.title.bold()));
                if !item.text.is_empty() {
                    // markup is opaque and rendered verbatim
                    out.push_str(&format!("      {}\n", item.text));
                }
                for (index, line) in item.items.iter().enumerate() {
                    out.push_str(&format!(
                        "      Bill {}: {}\n",
                        index + 1,
                        line.name
                    ));
                    if !line.details.is_empty() {
                        out.push_str(&format!("          {}\n", line.details.italic()));
                    }
                }
            }
            out.push('\n');
        }
        out.trim_end().to_string()
    }

    /// Pretty JSON for any serializable view.
    pub fn format_json<T: Serialize>(value: &T) -> String {
        serde_json::to_string_pretty(value).unwrap_or_else(|e| format!("{{\"error\": \"{e}\"}}"))
    }

    fn status_badge(status: BillStatus) -> ColoredString {
        let label = status.label().to_uppercase();
        match status {
            BillStatus::Passed | BillStatus::Enacted | BillStatus::OverrideWon => label.green(),
            BillStatus::Failed | BillStatus::Vetoed | BillStatus::OverrideLost => label.red(),
            BillStatus::Postponed | BillStatus::Withdrawn => label.yellow(),
            BillStatus::Submitted => label.dimmed(),
            _ => label.blue(),
        }
    }

    fn party_badge(party: Party) -> ColoredString {
        match party {
            Party::UnitedRussia => party.label().red(),
            Party::RussiaOfTheFuture => party.label().blue(),
            Party::Independent => party.label().magenta(),
        }
    }
}

//! Plain-text rendering for terminal output.

use destiny_core::{EventCatalog, Leaderboard, RankedPlayer};

pub fn leaderboard_table(board: &Leaderboard) -> String {
    let name_width = board
        .entries()
        .iter()
        .map(|entry| entry.participant.display_name.chars().count())
        .max()
        .unwrap_or(0)
        .max("Name".len());

    let mut s = String::new();
    s.push_str(&format!(
        "{:>4}  {:<name_width$}  {:>8}  {:>8}  {:>8}  {:>10}  {}\n",
        "Rank",
        "Name",
        "Destiny",
        "Balance",
        "Impact",
        "Efficiency",
        "Archetype",
    ));
    for entry in board.entries() {
        let report = &entry.report;
        s.push_str(&format!(
            "{:>4}  {:<name_width$}  {:>8.2}  {:>8.2}  {:>8.2}  {:>9.2}%  {} {}\n",
            entry.rank,
            entry.participant.display_name,
            report.final_destiny,
            report.balance_index,
            report.impact_index,
            report.efficiency_index,
            report.archetype.info().icon,
            report.archetype.info().name,
        ));
    }
    if board.is_empty() {
        s.push_str("(no participants)\n");
    }
    s
}

pub fn player_details(entry: &RankedPlayer, total_players: usize) -> String {
    let report = &entry.report;
    let info = report.archetype.info();

    let mut s = String::new();
    s.push_str(&format!(
        "{} ({})\n",
        entry.participant.display_name, entry.participant.id
    ));
    s.push_str(&format!("RANK: {} / {}\n", entry.rank, total_players));
    s.push_str(&format!(
        "ARCHETYPE: {} {} [{}]\n  {}\n\n",
        info.icon, info.name, report.archetype, info.description
    ));
    s.push_str(&format!("FINAL DESTINY: {:.2}\n", report.final_destiny));
    s.push_str(&format!("BALANCE:       {:.2}\n", report.balance_index));
    s.push_str(&format!("IMPACT:        {:.2}\n", report.impact_index));
    s.push_str(&format!("EFFICIENCY:    {:.2}%\n", report.efficiency_index));
    s.push_str(&format!(
        "  rounds played {}, baseline {}, events {:+}, effective {}, allocated {}, reserve {}\n\n",
        report.rounds_played,
        report.total_baseline_score,
        report.event_score,
        report.total_effective,
        report.total_allocations,
        report.reserves_total
    ));
    s.push_str("LIFETIME:\n");
    for (factor, total) in report.lifetime.iter() {
        s.push_str(&format!("  {:<13} {:>6}\n", factor.label(), total));
    }
    s
}

pub fn catalog_table(catalog: &EventCatalog) -> String {
    let mut s = String::new();
    for event in catalog.iter() {
        let effects = event
            .effects
            .iter()
            .map(|effect| format!("{} {:+}", effect.factor, effect.modifier))
            .collect::<Vec<_>>()
            .join(", ");
        s.push_str(&format!(
            "{:<22} {:>3}-{:<3} {:<16} {}  [{}]\n",
            event.id,
            event.min_age,
            event.max_age,
            event.category.label(),
            event.description,
            effects
        ));
    }
    s
}

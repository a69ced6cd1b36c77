//! End-of-game life summaries, one template per archetype.

use crate::archetype::Archetype;
use crate::scoring::ScoreReport;

/// Prose summary of a finished life for the given player.
pub fn narrate(display_name: &str, report: &ScoreReport) -> String {
    let destiny = format!("{:.2}", report.final_destiny);
    let balance = format!("{:.2}", report.balance_index);
    let impact = format!("{:.2}", report.impact_index);
    let efficiency = format!("{:.2}", report.efficiency_index);

    match report.archetype {
        Archetype::Legend => format!(
            "{name}, you lived a legendary life. With a Final Destiny of {destiny} and a \
            Balance Index of {balance}, no part of your life was left behind. At 120 you leave \
            a legacy that touched {impact} points of culture, community and environment.",
            name = display_name,
        ),
        Archetype::TrueWealth => format!(
            "{name}, your wealth was measured in what you gave. An Impact Index of {impact} \
            and an Efficiency of {efficiency}% show resources well spent on the world around \
            you. Final Destiny: {destiny}.",
            name = display_name,
        ),
        Archetype::SuccessfulUnfulfilled => format!(
            "{name}, the money came, but the rest of life waited. Your finances thrived while \
            your Balance Index stopped at {balance}. Final Destiny: {destiny}. Perhaps the next \
            life spends a little more on health, emotion and the people around you.",
            name = display_name,
        ),
        Archetype::Survivor => format!(
            "{name}, you made it through. Most of your reserve was spent before forty just to \
            stay afloat, yet you kept going with an Efficiency of {efficiency}% and a Balance \
            Index of {balance}. Final Destiny: {destiny}.",
            name = display_name,
        ),
        Archetype::Balanced => format!(
            "{name}, you kept a steady course. A Balance Index of {balance}, an Impact Index \
            of {impact} and an Efficiency of {efficiency}% add up to a Final Destiny of \
            {destiny}: a life of calm, even growth.",
            name = display_name,
        ),
    }
}

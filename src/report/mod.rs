use serde::{Deserialize, Serialize};

use crate::core::Recommendation;

#[derive(Copy, Clone, Debug, Default, Eq, PartialEq, Deserialize, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum Theme {
    #[default]
    Dark,
    Light,
}

#[derive(Copy, Clone, Debug, Eq, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct Palette {
    pub theme: Theme,
    pub background: &'static str,
    pub secondary_background: &'static str,
    pub text: &'static str,
    pub accent: &'static str,
}

const DARK_PALETTE: Palette = Palette {
    theme: Theme::Dark,
    background: "#0E1117",
    secondary_background: "#1E222A",
    text: "#00C896",
    accent: "#00C896",
};

const LIGHT_PALETTE: Palette = Palette {
    theme: Theme::Light,
    background: "#FFFFFF",
    secondary_background: "#939393",
    text: "#111111",
    accent: "#007F5F",
};

impl Theme {
    pub fn palette(self) -> &'static Palette {
        match self {
            Theme::Dark => &DARK_PALETTE,
            Theme::Light => &LIGHT_PALETTE,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Card {
    pub title: &'static str,
    pub lines: Vec<String>,
}

#[derive(Debug, Clone, Copy)]
pub struct ProfileSummary<'a> {
    pub age: u32,
    pub risk: &'a str,
    pub goal: &'a str,
}

pub fn recommendation_cards(profile: ProfileSummary<'_>, rec: &Recommendation) -> Vec<Card> {
    vec![
        Card {
            title: "Portfolio Allocation",
            lines: rec
                .allocation
                .iter()
                .map(|(class, value)| format!("{}: {value:.1}%", class.label()))
                .collect(),
        },
        Card {
            title: "Suggested Monthly Investment",
            lines: vec![format_rupees(rec.suggested_investment)],
        },
        Card {
            title: "Advisor's Note",
            lines: vec![advisor_note(profile)],
        },
    ]
}

pub fn advisor_note(profile: ProfileSummary<'_>) -> String {
    format!(
        "For a {} risk profile at age {}, this mix balances growth and stability toward your '{}' goal.",
        profile.risk.to_lowercase(),
        profile.age,
        profile.goal
    )
}

// 12500.0 -> "₹12,500"
pub fn format_rupees(amount: f64) -> String {
    let rounded = amount.round();
    let digits = format!("{:.0}", rounded.abs());
    let mut grouped = String::with_capacity(digits.len() + digits.len() / 3);
    for (idx, ch) in digits.chars().enumerate() {
        if idx > 0 && (digits.len() - idx) % 3 == 0 {
            grouped.push(',');
        }
        grouped.push(ch);
    }
    let sign = if rounded < 0.0 { "-" } else { "" };
    format!("{sign}₹{grouped}")
}

pub fn render_text(cards: &[Card]) -> String {
    let mut out = String::new();
    for card in cards {
        out.push_str(card.title);
        out.push('\n');
        for line in &card.lines {
            out.push_str("  ");
            out.push_str(line);
            out.push('\n');
        }
    }
    out
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::core::{Goal, RiskTier, compute_allocation};

    fn sample_profile() -> ProfileSummary<'static> {
        ProfileSummary {
            age: 25,
            risk: "Moderate",
            goal: "Long-term",
        }
    }

    #[test]
    fn format_rupees_groups_thousands() {
        assert_eq!(format_rupees(0.0), "₹0");
        assert_eq!(format_rupees(500.0), "₹500");
        assert_eq!(format_rupees(12_500.0), "₹12,500");
        assert_eq!(format_rupees(1_234_500.0), "₹1,234,500");
        assert_eq!(format_rupees(-2_000.0), "-₹2,000");
    }

    #[test]
    fn cards_list_allocation_amount_and_note() {
        let rec = compute_allocation(25, 50_000.0, RiskTier::Moderate, Some(Goal::LongTerm));
        let cards = recommendation_cards(sample_profile(), &rec);

        assert_eq!(cards.len(), 3);
        assert_eq!(
            cards[0].lines,
            vec!["Equity: 50.0%", "Debt: 30.0%", "Gold: 15.0%", "Cash: 5.0%"]
        );
        assert_eq!(cards[1].lines, vec!["₹12,500"]);
        assert_eq!(
            cards[2].lines[0],
            "For a moderate risk profile at age 25, this mix balances growth and stability toward your 'Long-term' goal."
        );
    }

    #[test]
    fn render_text_indents_card_lines() {
        let cards = vec![Card {
            title: "Suggested Monthly Investment",
            lines: vec!["₹7,500".to_string()],
        }];
        assert_eq!(
            render_text(&cards),
            "Suggested Monthly Investment\n  ₹7,500\n"
        );
    }

    #[test]
    fn palettes_differ_by_theme() {
        assert_eq!(Theme::default(), Theme::Dark);
        assert_eq!(Theme::Dark.palette().background, "#0E1117");
        assert_eq!(Theme::Light.palette().accent, "#007F5F");
        let json = serde_json::to_string(Theme::Light.palette()).expect("palette should serialize");
        assert!(json.contains("\"secondaryBackground\""));
        assert!(json.contains("\"theme\":\"light\""));
    }
}

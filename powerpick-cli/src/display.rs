use comfy_table::{ContentArrangement, Table, presets::UTF8_FULL};

use powerpick_core::frequency::FrequencyDistribution;
use powerpick_core::game::GameConfig;
use powerpick_core::models::Ticket;

use crate::import::LoadSummary;

pub fn display_tickets(tickets: &[Ticket], config: &GameConfig) {
    if tickets.is_empty() {
        println!("Aucune grille à afficher.");
        return;
    }

    println!("\n🎟️  Grilles {} \n", config.name);

    let mut table = Table::new();
    table
        .load_preset(UTF8_FULL)
        .set_content_arrangement(ContentArrangement::Dynamic)
        .set_header(vec!["#", "Numéros", config.special_label]);

    for (i, ticket) in tickets.iter().enumerate() {
        let main_str = ticket
            .main
            .iter()
            .map(|n| format!("{:2}", n))
            .collect::<Vec<_>>()
            .join(" - ");

        table.add_row(vec![
            &format!("{}", i + 1),
            &main_str,
            &format!("{:2}", ticket.special),
        ]);
    }
    println!("{table}");
}

pub fn display_frequencies(
    main_freq: &FrequencyDistribution,
    special_freq: &FrequencyDistribution,
    config: &GameConfig,
    years: i32,
) {
    println!(
        "\n📊 Fréquences {} sur les {} dernières années\n",
        config.name, years
    );

    println!("── Numéros principaux (1-{}) ──", config.main_range);
    display_freq_table(main_freq);

    println!("\n── {} (1-{}) ──", config.special_label, config.special_range);
    display_freq_table(special_freq);
}

fn display_freq_table(freq: &FrequencyDistribution) {
    if freq.is_empty() {
        println!("Aucun tirage dans la fenêtre demandée.");
        return;
    }

    let mut table = Table::new();
    table
        .load_preset(UTF8_FULL)
        .set_content_arrangement(ContentArrangement::Dynamic)
        .set_header(vec!["Numéro", "Occurrences"]);

    let mut sorted: Vec<(u8, u32)> = freq.iter().collect();
    sorted.sort_by(|a, b| b.1.cmp(&a.1));

    for (value, count) in &sorted {
        table.add_row(vec![&format!("{:2}", value), &count.to_string()]);
    }
    println!("{table}");
}

pub fn display_load_summary(summary: &LoadSummary) {
    println!("Historique chargé :");
    println!("  Lignes lues      : {}", summary.total);
    println!("  Tirages retenus  : {}", summary.kept);
    if summary.dropped > 0 {
        println!("  Lignes écartées  : {}", summary.dropped);
    }
}

use std::fmt::Write;

use moviefix_core::{poster_url, AppViewModel};

/// Renders the view model as plain text for the terminal.
pub fn render_text(view: &AppViewModel, image_base_url: &str) -> String {
    let mut out = String::new();
    let _ = writeln!(out, "MOVIEFIX  ({})", view.page.filter);

    if view.categories_loading {
        let _ = writeln!(out, "genres: loading...");
    } else if let Some(err) = &view.categories_error {
        let _ = writeln!(out, "genres unavailable: {err}");
    } else if !view.chips.is_empty() {
        let chips: Vec<String> = view
            .chips
            .iter()
            .map(|chip| {
                let mark = if chip.selected { 'x' } else { ' ' };
                format!("[{mark}] {} ({})", chip.name, chip.id)
            })
            .collect();
        let _ = writeln!(out, "genres: {}", chips.join("  "));
    }

    for bucket in &view.buckets {
        let _ = writeln!(out);
        let _ = writeln!(out, "== {} ==", bucket.year);
        for entry in &bucket.items {
            let item = &entry.item;
            let _ = write!(out, "  {}  [{:.1}]", item.title, item.score);
            if !entry.genre_label.is_empty() {
                let _ = write!(out, "  {}", entry.genre_label);
            }
            let _ = writeln!(out);
            if let Some(url) = poster_url(image_base_url, &item.poster_path) {
                let _ = writeln!(out, "      {url}");
            }
        }
    }

    let _ = writeln!(out);
    let page = &view.page;
    if page.loading {
        let _ = writeln!(out, "loading page {}...", page.next_page);
    } else if let Some(err) = &page.error {
        let _ = writeln!(out, "error loading movies: {err} ('next' retries)");
    } else if page.items.is_empty() && !page.has_more {
        let _ = writeln!(out, "no movies match these filters");
    } else if !page.has_more {
        let _ = writeln!(out, "-- end of results ({} movies) --", page.items.len());
    } else {
        let _ = writeln!(
            out,
            "-- {} movies, {} pages loaded; 'next' for more --",
            page.items.len(),
            page.page_count
        );
    }
    out
}

pub fn render_json(view: &AppViewModel) -> anyhow::Result<String> {
    Ok(serde_json::to_string_pretty(view)?)
}

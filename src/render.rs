//! Card markup for the service container.
//!
//! Cards are rendered from the records alone, so every render starts with all
//! hearts un-liked. The browser swaps the whole container on each load.

use crate::models::ServiceRecord;

pub fn render_cards(records: &[ServiceRecord]) -> String {
    let mut html = String::new();
    for record in records {
        render_card(&mut html, record);
    }
    html
}

pub fn render_loading() -> String {
    r#"<p class="container-note" data-state="loading">Loading services...</p>"#.to_string()
}

pub fn render_load_error(message: &str) -> String {
    format!(
        r#"<p class="container-note error" data-state="error">Could not load services: {}</p>"#,
        escape(message)
    )
}

fn render_card(html: &mut String, record: &ServiceRecord) {
    let id = escape(&record.id);
    html.push_str(&format!(
        r#"
<article class="card" data-id="{id}">
  <div class="card-top">
    <div class="card-icon {bg}"><i class="{icon} {color}"></i></div>
    <button class="like-btn" type="button" data-control="like" data-id="{id}" aria-pressed="false">
      <i class="fa-regular fa-heart"></i>
    </button>
  </div>
  <div class="card-body">
    <h3 class="card-name">{name}</h3>
    <p class="card-description">{description}</p>
    <p class="card-number">{number}</p>
  </div>
  <div class="card-footer">
    <span class="badge">{category}</span>
    <div class="card-actions">
      <button class="copy-btn" type="button" data-control="copy" data-id="{id}"><i class="fa-regular fa-copy"></i> Copy</button>
      <button class="call-btn" type="button" data-control="call" data-id="{id}"><i class="fa-solid fa-phone"></i> Call</button>
    </div>
  </div>
</article>"#,
        bg = escape(&record.icon.bg_color),
        icon = escape(&record.icon.class),
        color = escape(&record.icon.color),
        name = escape(&record.name),
        description = escape(&record.description),
        number = escape(&record.number),
        category = escape(&record.category),
    ));
}

pub fn escape(value: &str) -> String {
    let mut out = String::with_capacity(value.len());
    for ch in value.chars() {
        match ch {
            '&' => out.push_str("&amp;"),
            '<' => out.push_str("&lt;"),
            '>' => out.push_str("&gt;"),
            '"' => out.push_str("&quot;"),
            '\'' => out.push_str("&#39;"),
            _ => out.push(ch),
        }
    }
    out
}

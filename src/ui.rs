use crate::models::{HistoryEntry, StateSnapshot};
use crate::render::{escape, render_loading};
use crate::store::{CopyMode, Policy};

pub fn render_index(snapshot: &StateSnapshot, policy: &Policy) -> String {
    let copy_gated = matches!(policy.copy_mode, CopyMode::Gated { .. });
    INDEX_HTML
        .replace("{{APPRECIATION}}", &snapshot.appreciation.to_string())
        .replace("{{COINS}}", &snapshot.coins.to_string())
        .replace("{{COPIES}}", &snapshot.copy_credits.to_string())
        .replace("{{COPY_GATED}}", if copy_gated { "true" } else { "false" })
        .replace("{{CARDS}}", &render_loading())
        .replace("{{HISTORY}}", &render_history(&snapshot.history))
}

pub fn render_history(history: &[HistoryEntry]) -> String {
    history
        .iter()
        .map(|entry| {
            format!(
                r#"<li class="history-item"><div><p class="history-name">{}</p><p class="history-number">{}</p></div><p class="history-time">{}</p></li>"#,
                escape(&entry.service_name),
                escape(&entry.service_number),
                escape(&entry.time)
            )
        })
        .collect()
}

const INDEX_HTML: &str = r#"<!DOCTYPE html>
<html lang="en">
<head>
  <meta charset="UTF-8" />
  <meta name="viewport" content="width=device-width, initial-scale=1.0" />
  <title>Emergency Service Directory</title>
  <link rel="stylesheet" href="https://cdnjs.cloudflare.com/ajax/libs/font-awesome/6.5.2/css/all.min.css" />
  <style>
    :root {
      --bg: #f4f5f7;
      --ink: #1f2937;
      --muted: #6b7280;
      --accent: #10b981;
      --danger: #ef4444;
      --card: #ffffff;
      --line: rgba(31, 41, 55, 0.1);
    }

    * {
      box-sizing: border-box;
    }

    body {
      margin: 0;
      background: var(--bg);
      color: var(--ink);
      font-family: "Inter", "Segoe UI", sans-serif;
    }

    header.top {
      display: flex;
      flex-wrap: wrap;
      justify-content: space-between;
      align-items: center;
      gap: 16px;
      padding: 18px 28px;
      background: white;
      border-bottom: 1px solid var(--line);
    }

    header.top h1 {
      margin: 0;
      font-size: 1.4rem;
    }

    .counters {
      display: flex;
      gap: 12px;
    }

    .counter {
      display: inline-flex;
      align-items: center;
      gap: 8px;
      padding: 8px 14px;
      border-radius: 999px;
      background: var(--bg);
      font-weight: 600;
    }

    .counter .fa-heart {
      color: var(--danger);
    }

    .counter .fa-coins {
      color: #f59e0b;
    }

    main.layout {
      display: grid;
      grid-template-columns: minmax(0, 3fr) minmax(260px, 1fr);
      gap: 24px;
      padding: 28px;
    }

    #cards-container {
      display: grid;
      grid-template-columns: repeat(auto-fill, minmax(240px, 1fr));
      gap: 18px;
      align-content: start;
    }

    .card {
      background: var(--card);
      border: 1px solid var(--line);
      border-radius: 18px;
      padding: 22px;
      display: flex;
      flex-direction: column;
      gap: 14px;
    }

    .card-top,
    .card-footer {
      display: flex;
      justify-content: space-between;
      align-items: center;
    }

    .card-icon {
      padding: 12px;
      border-radius: 12px;
      font-size: 1.4rem;
    }

    .bg-gray-100 {
      background: #f3f4f6;
    }

    .text-emerald-500 {
      color: var(--accent);
    }

    .card-name {
      margin: 0;
      font-size: 1.05rem;
    }

    .card-description {
      margin: 4px 0 0;
      color: var(--muted);
      font-size: 0.9rem;
    }

    .card-number {
      margin: 12px 0 0;
      font-size: 1.8rem;
      font-weight: 700;
    }

    .badge {
      border: 1px solid var(--line);
      border-radius: 999px;
      padding: 4px 10px;
      font-size: 0.8rem;
      color: var(--muted);
    }

    .card-actions {
      display: flex;
      gap: 8px;
    }

    button {
      appearance: none;
      border: none;
      border-radius: 10px;
      padding: 8px 12px;
      font-size: 0.9rem;
      cursor: pointer;
    }

    .like-btn {
      background: transparent;
      font-size: 1.3rem;
      color: #9ca3af;
    }

    .like-btn.liked {
      color: var(--danger);
    }

    .copy-btn {
      background: #e5e7eb;
    }

    .call-btn {
      background: var(--accent);
      color: white;
    }

    .container-note {
      grid-column: 1 / -1;
      color: var(--muted);
    }

    .container-note.error {
      color: var(--danger);
    }

    aside.history {
      background: white;
      border: 1px solid var(--line);
      border-radius: 18px;
      padding: 22px;
      align-self: start;
    }

    .history-header {
      display: flex;
      justify-content: space-between;
      align-items: center;
    }

    .history-header h2 {
      margin: 0;
      font-size: 1.1rem;
    }

    .clear-btn {
      background: var(--accent);
      color: white;
    }

    #history-list {
      list-style: none;
      margin: 16px 0 0;
      padding: 0;
      display: grid;
      gap: 12px;
    }

    .history-item {
      display: flex;
      justify-content: space-between;
      align-items: center;
      background: var(--bg);
      border-radius: 12px;
      padding: 10px 12px;
    }

    .history-item p {
      margin: 0;
    }

    .history-name,
    .history-time {
      font-weight: 600;
    }

    .history-number {
      color: var(--muted);
      font-size: 0.85rem;
    }

    .status {
      position: fixed;
      bottom: 20px;
      left: 50%;
      transform: translateX(-50%);
      padding: 10px 18px;
      border-radius: 999px;
      background: var(--ink);
      color: white;
      opacity: 0;
      transition: opacity 150ms ease;
    }

    .status.visible {
      opacity: 1;
    }

    .status[data-type="error"] {
      background: var(--danger);
    }

    @media (max-width: 820px) {
      main.layout {
        grid-template-columns: 1fr;
      }
    }
  </style>
</head>
<body data-copy-gated="{{COPY_GATED}}">
  <header class="top">
    <h1>Emergency Service Directory</h1>
    <div class="counters">
      <span class="counter"><i class="fa-solid fa-heart"></i><span id="love-count">{{APPRECIATION}}</span></span>
      <span class="counter"><i class="fa-solid fa-coins"></i><span id="coin-count">{{COINS}}</span></span>
      <span class="counter"><i class="fa-regular fa-copy"></i><span id="copy-count">{{COPIES}}</span></span>
    </div>
  </header>

  <main class="layout">
    <section id="cards-container">
      {{CARDS}}
    </section>

    <aside class="history">
      <div class="history-header">
        <h2><i class="fa-solid fa-clock-rotate-left"></i> Call History</h2>
        <form id="clear-history-form" method="post" action="/history/clear">
          <button class="clear-btn" id="clear-history-btn" type="submit">Clear</button>
        </form>
      </div>
      <ul id="history-list">{{HISTORY}}</ul>
    </aside>
  </main>

  <div class="status" id="status"></div>

  <script>
    const cardsContainer = document.getElementById('cards-container');
    const loveCountEl = document.getElementById('love-count');
    const coinCountEl = document.getElementById('coin-count');
    const copyCountEl = document.getElementById('copy-count');
    const historyListEl = document.getElementById('history-list');
    const clearForm = document.getElementById('clear-history-form');
    const statusEl = document.getElementById('status');
    const copyGated = document.body.dataset.copyGated === 'true';

    const services = new Map();
    let copyCredits = Number(copyCountEl.textContent);
    let statusTimer = null;

    const setStatus = (message, type) => {
      statusEl.textContent = message;
      statusEl.dataset.type = type || '';
      statusEl.classList.add('visible');
      clearTimeout(statusTimer);
      statusTimer = setTimeout(() => statusEl.classList.remove('visible'), 1800);
    };

    const escapeHtml = (value) =>
      String(value)
        .replace(/&/g, '&amp;')
        .replace(/</g, '&lt;')
        .replace(/>/g, '&gt;')
        .replace(/"/g, '&quot;')
        .replace(/'/g, '&#39;');

    const renderHistory = (history) => {
      historyListEl.innerHTML = history
        .map(
          (entry) => `<li class="history-item"><div><p class="history-name">${escapeHtml(entry.service_name)}</p><p class="history-number">${escapeHtml(entry.service_number)}</p></div><p class="history-time">${escapeHtml(entry.time)}</p></li>`
        )
        .join('');
    };

    const updateUI = (state) => {
      loveCountEl.textContent = state.appreciation;
      coinCountEl.textContent = state.coins;
      copyCountEl.textContent = state.copy_credits;
      copyCredits = state.copy_credits;
      renderHistory(state.history);
    };

    const setLiked = (button, liked) => {
      const icon = button.querySelector('i');
      button.classList.toggle('liked', liked);
      button.setAttribute('aria-pressed', String(liked));
      icon.classList.toggle('fa-regular', !liked);
      icon.classList.toggle('fa-solid', liked);
    };

    const send = async (body) => {
      const res = await fetch('/api/click', {
        method: 'POST',
        headers: { 'content-type': 'application/json' },
        body: JSON.stringify(body)
      });

      if (!res.ok) {
        const msg = await res.text();
        throw new Error(msg || 'Request failed');
      }

      return res.json();
    };

    const writeClipboard = async (text) => {
      try {
        await navigator.clipboard.writeText(text);
        return { status: 'written' };
      } catch (err) {
        console.error('Failed to copy: ', err);
        return { status: 'failed', reason: err && err.message ? err.message : 'clipboard unavailable' };
      }
    };

    const handleContainerClick = async (button) => {
      const control = button.dataset.control;
      const id = button.dataset.id;
      const body = { control, id };

      if (control === 'copy') {
        const service = services.get(id);
        if (!service) {
          return;
        }
        if (!copyGated || copyCredits > 0) {
          body.clipboard = await writeClipboard(service.number);
        }
      }

      const response = await send(body);
      updateUI(response.state);
      if (control === 'like') {
        setLiked(button, response.state.liked_ids.includes(id));
      }
      setStatus(response.message, 'ok');
    };

    cardsContainer.addEventListener('click', (event) => {
      const button = event.target.closest('button[data-control]');
      if (!button) {
        return;
      }
      handleContainerClick(button).catch((err) => setStatus(err.message, 'error'));
    });

    clearForm.addEventListener('submit', (event) => {
      event.preventDefault();
      fetch('/api/history/clear', { method: 'POST' })
        .then((res) => res.json())
        .then((response) => {
          updateUI(response.state);
          setStatus(response.message, 'ok');
        })
        .catch((err) => setStatus(err.message, 'error'));
    });

    const loadCatalog = async () => {
      const res = await fetch('/api/catalog');
      if (!res.ok) {
        throw new Error('Unable to load services');
      }
      const catalog = await res.json();
      services.clear();
      catalog.services.forEach((service) => services.set(service.id, service));
      return catalog.status;
    };

    const loadCards = async () => {
      const status = await loadCatalog();
      const res = await fetch('/cards');
      if (!res.ok) {
        throw new Error('Unable to load services');
      }
      cardsContainer.innerHTML = await res.text();
      if (status === 'loading') {
        setTimeout(() => loadCards().catch((err) => setStatus(err.message, 'error')), 500);
      }
    };

    loadCards().catch((err) => setStatus(err.message, 'error'));
  </script>
</body>
</html>
"#;

#[cfg(test)]
mod tests {
    use super::*;
    use crate::store::InteractionState;

    #[test]
    fn index_shows_counters_and_history() {
        let mut snapshot = InteractionState::new(Policy::default()).snapshot();
        snapshot.appreciation = 3;
        snapshot.history.push(HistoryEntry {
            service_name: "Police".to_string(),
            service_number: "999".to_string(),
            time: "03:04:05 PM".to_string(),
        });

        let html = render_index(&snapshot, &Policy::default());
        assert!(html.contains(r#"<span id="love-count">3</span>"#));
        assert!(html.contains(r#"<span id="coin-count">100</span>"#));
        assert!(html.contains(r#"data-copy-gated="false""#));
        assert!(html.contains("03:04:05 PM"));
        assert!(html.contains(&render_loading()));
        assert!(!html.contains("{{"));
    }

    #[test]
    fn gated_policy_is_exposed_to_the_page() {
        let policy = Policy {
            copy_mode: CopyMode::Gated { reward: 1 },
            ..Policy::default()
        };
        let snapshot = InteractionState::new(policy.clone()).snapshot();
        assert!(render_index(&snapshot, &policy).contains(r#"data-copy-gated="true""#));
    }
}

//! Embedded HTML/CSS/JS frontend for the Nexus IQ dashboard.
//!
//! The SPA is compiled into the binary as a string constant and served for
//! every page route. It reads its route from `location.pathname`, asks
//! `/api/pages/<route>` for the page view model, and renders it. Filter and
//! expand state lives in the URL query string, so a reload or a shared link
//! shows the same view.

/// The complete single-page dashboard HTML.
pub const INDEX_HTML: &str = r##"<!DOCTYPE html>
<html lang="en">
<head>
<meta charset="utf-8">
<meta name="viewport" content="width=device-width, initial-scale=1">
<title>Nexus IQ</title>
<style>
:root {
  --bg: #0f0f1a;
  --surface: #1a1a2e;
  --border: rgba(255,255,255,0.08);
  --text: #f3f4f6;
  --text-muted: #9ca3af;
  --purple: #7c3aed;
  --cyan: #2dd4bf;
  --orange: #f97316;
  --pink: #ec4899;
  --green: #22c55e;
  --yellow: #eab308;
  --red: #ef4444;
  --blue: #3b82f6;
  --radius: 10px;
  --font: -apple-system, BlinkMacSystemFont, 'Segoe UI', Helvetica, Arial, sans-serif;
  --mono: 'SF Mono', 'Cascadia Code', 'Fira Code', monospace;
}

* { margin: 0; padding: 0; box-sizing: border-box; }
body {
  background: var(--bg);
  color: var(--text);
  font-family: var(--font);
  font-size: 14px;
  line-height: 1.5;
}

/* Layout */
.shell { display: flex; min-height: 100vh; }

aside {
  width: 230px;
  flex-shrink: 0;
  background: var(--surface);
  border-right: 1px solid var(--border);
  padding: 24px 16px;
}

aside .brand { font-size: 20px; font-weight: 700; }
aside .brand span { color: var(--purple); }
aside .tagline { color: var(--text-muted); font-size: 12px; margin-bottom: 28px; }

aside a {
  display: block;
  padding: 9px 12px;
  margin-bottom: 4px;
  border-radius: 8px;
  color: var(--text-muted);
  text-decoration: none;
  font-weight: 500;
}

aside a:hover { color: var(--text); background: rgba(255,255,255,0.04); }
aside a.active { color: #fff; background: var(--purple); }

main { flex: 1; padding: 28px 32px; max-width: 1280px; }

.crumbs { color: var(--text-muted); font-size: 12px; margin-bottom: 8px; }
.crumbs a { color: var(--text-muted); text-decoration: none; }
.crumbs a:hover { color: var(--text); }

.page-header { display: flex; justify-content: space-between; align-items: center; margin-bottom: 24px; }
.page-header h1 { font-size: 26px; font-weight: 700; }
.page-header .subtitle { color: var(--text-muted); }

/* Badges */
.badge {
  display: inline-flex;
  align-items: center;
  padding: 3px 10px;
  border-radius: 12px;
  font-size: 12px;
  font-weight: 500;
  border: 1px solid var(--border);
  color: var(--text-muted);
  white-space: nowrap;
}

.badge.success { border-color: var(--green); color: var(--green); }
.badge.warning { border-color: var(--yellow); color: var(--yellow); }
.badge.danger { border-color: var(--red); color: var(--red); }
.badge.info { border-color: var(--cyan); color: var(--cyan); }

/* Cards */
.grid { display: grid; gap: 16px; margin-bottom: 20px; }
.grid.four { grid-template-columns: repeat(auto-fit, minmax(210px, 1fr)); }
.grid.two { grid-template-columns: repeat(auto-fit, minmax(380px, 1fr)); }
.grid.three { grid-template-columns: repeat(auto-fit, minmax(280px, 1fr)); }

.card {
  background: var(--surface);
  border: 1px solid var(--border);
  border-radius: var(--radius);
  padding: 20px;
  margin-bottom: 20px;
}

.grid .card { margin-bottom: 0; }

.card h2 { font-size: 16px; font-weight: 600; margin-bottom: 4px; }
.card .hint { color: var(--text-muted); font-size: 12px; margin-bottom: 14px; }
.info { cursor: help; color: var(--text-muted); margin-left: 6px; font-size: 12px; }

.kpi .title { color: var(--text-muted); font-size: 13px; }
.kpi .value { font-size: 30px; font-weight: 700; margin-top: 4px; font-family: var(--mono); }
.kpi .sub { color: var(--text-muted); font-size: 12px; margin-top: 2px; }
.kpi .trend.up { color: var(--green); font-size: 12px; }
.kpi .trend.down { color: var(--red); font-size: 12px; }
.kpi.success .value { color: var(--green); }
.kpi.warning .value { color: var(--yellow); }
.kpi.danger .value { color: var(--red); }
.kpi.info .value { color: var(--cyan); }

.stat-row { display: flex; justify-content: space-between; align-items: center; padding: 7px 0; }
.stat-row .label { color: var(--text-muted); }
.stat-row .val { font-weight: 700; }

/* Score bars */
.bar-row { margin-bottom: 12px; }
.bar-row .head { display: flex; justify-content: space-between; font-size: 13px; margin-bottom: 4px; }
.bar-track { height: 10px; border-radius: 6px; background: rgba(255,255,255,0.08); overflow: hidden; }
.bar-fill { height: 100%; border-radius: 6px; background: linear-gradient(90deg, var(--cyan), var(--purple)); transition: width 0.4s; }
.breakdown { color: var(--text-muted); font-size: 11px; font-family: var(--mono); margin-top: 3px; }

/* Charts */
.chart { display: flex; align-items: flex-end; gap: 6px; height: 180px; padding-top: 12px; }
.chart .col { flex: 1; display: flex; flex-direction: column; align-items: center; justify-content: flex-end; height: 100%; }
.chart .bars { display: flex; align-items: flex-end; gap: 2px; width: 100%; justify-content: center; height: 100%; }
.chart .bar { width: 100%; max-width: 36px; border-radius: 4px 4px 0 0; min-height: 2px; }
.chart .bar:hover { opacity: 0.8; }
.chart .lbl { font-size: 10px; color: var(--text-muted); margin-top: 6px; white-space: nowrap; overflow: hidden; max-width: 100%; }
.legend { display: flex; flex-wrap: wrap; gap: 12px; font-size: 12px; color: var(--text-muted); margin-top: 10px; }
.legend i { display: inline-block; width: 10px; height: 10px; border-radius: 3px; margin-right: 5px; vertical-align: middle; }
.pie { display: flex; height: 26px; border-radius: 6px; overflow: hidden; margin-top: 8px; }
.pie div { height: 100%; }

/* Tables and lists */
table { width: 100%; border-collapse: collapse; font-size: 13px; }
th, td { text-align: left; padding: 8px 10px; border-bottom: 1px solid var(--border); }
th { color: var(--text-muted); font-weight: 500; font-size: 12px; text-transform: uppercase; letter-spacing: 0.5px; }
td.num, th.num { text-align: right; font-family: var(--mono); }
tr.row { cursor: pointer; }
tr.row:hover { background: rgba(255,255,255,0.03); }
tr.details td { background: rgba(0,0,0,0.2); color: var(--text-muted); }
.chip { display: inline-block; padding: 1px 8px; margin: 1px 2px; border-radius: 6px; font-size: 11px; background: rgba(124,58,237,0.2); color: var(--purple); }
.action { margin-top: 8px; padding: 10px; border-radius: 8px; background: rgba(234,179,8,0.1); color: var(--text); }
.action b { color: var(--yellow); font-size: 12px; display: block; }
.note { text-align: center; color: var(--text-muted); font-size: 12px; margin-top: 12px; }
.empty { text-align: center; color: var(--text-muted); padding: 28px; }

/* Filters */
.filters { display: flex; flex-wrap: wrap; gap: 10px; margin-bottom: 14px; }
.filters input, .filters select {
  background: var(--bg);
  border: 1px solid var(--border);
  border-radius: 8px;
  color: var(--text);
  padding: 7px 10px;
  font-size: 13px;
}
.filters input { min-width: 240px; }

.big { font-size: 44px; font-weight: 800; text-align: center; }
.big small { font-size: 20px; color: var(--text-muted); font-weight: 400; }
.center { text-align: center; color: var(--text-muted); }
a.quick { display: block; padding: 14px; border-radius: 8px; background: rgba(255,255,255,0.03); color: var(--text); text-decoration: none; }
a.quick:hover { background: rgba(255,255,255,0.06); }
a.quick p { color: var(--text-muted); font-size: 12px; }

.error-box { padding: 24px; border: 1px solid var(--red); border-radius: var(--radius); color: var(--red); }
</style>
</head>
<body>
<div class="shell">
  <aside>
    <div class="brand">Nexus <span>IQ</span></div>
    <div class="tagline">Query Optimizer Observability</div>
    <nav id="nav"></nav>
  </aside>
  <main id="main"><div class="empty">Loading...</div></main>
</div>

<script>
// ---------------------------------------------------------------------------
// State
// ---------------------------------------------------------------------------
const PALETTE = ['#7c3aed', '#2dd4bf', '#f97316', '#ec4899', '#ef4444', '#22c55e', '#3b82f6', '#eab308'];
let page = null;
let searchTimer = null;

// ---------------------------------------------------------------------------
// API helpers
// ---------------------------------------------------------------------------
function slug() {
  const p = location.pathname.replace(/\/+$/, '');
  return p === '' ? 'overview' : p.slice(1);
}

async function load() {
  try {
    const res = await fetch('/api/pages/' + slug() + location.search);
    const body = await res.json();
    if (!res.ok) throw new Error(body.error || res.statusText);
    page = body;
    render();
  } catch (e) {
    document.getElementById('main').innerHTML = `<div class="error-box">Failed to load page: ${esc(e.message)}</div>`;
  }
}

function params() { return new URLSearchParams(location.search); }

function setParam(key, value) {
  const q = params();
  if (value === '' || value === 'all' || value === null) q.delete(key); else q.set(key, value);
  q.delete('expanded');
  go(location.pathname, q);
}

function toggleRow(key) {
  const q = params();
  const set = new Set((q.get('expanded') || '').split(',').filter(Boolean).map(decodeURIComponent));
  if (set.has(key)) set.delete(key); else set.add(key);
  if (set.size) q.set('expanded', [...set].map(encodeURIComponent).join(',')); else q.delete('expanded');
  go(location.pathname, q);
}

function go(path, q) {
  const qs = q && q.toString() ? '?' + q.toString() : '';
  history.pushState(null, '', path + qs);
  load();
}

window.addEventListener('popstate', load);

document.addEventListener('click', e => {
  const link = e.target.closest('a[data-link]');
  if (link) {
    e.preventDefault();
    go(link.getAttribute('href'));
    return;
  }
  const row = e.target.closest('tr[data-key]');
  if (row) toggleRow(row.dataset.key);
});

// ---------------------------------------------------------------------------
// Rendering primitives
// ---------------------------------------------------------------------------
function esc(s) {
  if (s === undefined || s === null) return '';
  return String(s).replace(/&/g,'&amp;').replace(/</g,'&lt;').replace(/>/g,'&gt;').replace(/"/g,'&quot;');
}

function num(n, digits) {
  if (n === undefined || n === null) return '0';
  return Number(n).toLocaleString(undefined, { maximumFractionDigits: digits === undefined ? 1 : digits });
}

function badge(b) {
  return b ? `<span class="badge ${b.variant}">${esc(b.label)}</span>` : '';
}

function info(text) {
  return text ? `<span class="info" title="${esc(text)}">&#9432;</span>` : '';
}

function kpi(c) {
  const trend = c.trend ? `<div class="trend ${c.trend.direction}">${c.trend.direction === 'up' ? '&#9650;' : '&#9660;'} ${esc(c.trend.label)}</div>` : '';
  return `<div class="card kpi ${c.variant}">
    <div class="title">${esc(c.title)}${info(c.tooltip)}</div>
    <div class="value">${esc(c.value)}</div>
    ${c.subtitle ? `<div class="sub">${esc(c.subtitle)}</div>` : ''}
    ${trend}
  </div>`;
}

function kpis(cards) { return `<div class="grid four">${cards.map(kpi).join('')}</div>`; }

function statRows(rows) {
  return rows.map(r => `<div class="stat-row"><span class="label">${esc(r.label)}</span>${r.badge ? badge(r.badge) : `<span class="val">${esc(r.value)}</span>`}</div>`).join('');
}

function scoreBar(b, right, extra) {
  return `<div class="bar-row">
    <div class="head"><span>${esc(b.label)}</span><span>${right === undefined ? num(b.value, 2) : right}</span></div>
    <div class="bar-track"><div class="bar-fill" style="width:${b.fill_pct}%"></div></div>
    ${extra || ''}
  </div>`;
}

function legend(names) {
  return `<div class="legend">${names.map((n, i) => `<span><i style="background:${PALETTE[i % PALETTE.length]}"></i>${esc(n)}</span>`).join('')}</div>`;
}

function chart(c) {
  if (!c.points.length) return '<div class="empty">No data</div>';
  if (c.kind === 'pie') {
    const total = c.points.reduce((s, p) => s + p.values[0], 0) || 1;
    return `<div class="pie">${c.points.map((p, i) => `<div title="${esc(p.label)}: ${num(p.values[0])}" style="width:${p.values[0] / total * 100}%;background:${PALETTE[i % PALETTE.length]}"></div>`).join('')}</div>${legend(c.points.map(p => `${p.label} (${num(p.values[0])})`))}`;
  }
  const max = Math.max(1, ...c.points.flatMap(p => p.values));
  const cols = c.points.map(p => `<div class="col">
      <div class="bars">${p.values.map((v, i) => `<div class="bar" title="${esc(p.label)}: ${num(v)}" style="height:${v / max * 100}%;background:${PALETTE[(c.series.length > 1 ? i + 5 : i + 1) % PALETTE.length]}"></div>`).join('')}</div>
      <div class="lbl">${esc(p.label)}</div>
    </div>`).join('');
  return `<div class="chart">${cols}</div>${c.series.length > 1 ? legend(c.series) : ''}`;
}

function card(title, body, hint, tooltip) {
  return `<div class="card"><h2>${esc(title)}${info(tooltip)}</h2>${hint ? `<div class="hint">${esc(hint)}</div>` : ''}${body}</div>`;
}

function note(list) { return list.note ? `<div class="note">${esc(list.note)}</div>` : ''; }

function chips(items) { return (items || []).map(e => `<span class="chip">${esc(e)}</span>`).join(''); }

function select(key, value, options) {
  return `<select onchange="setParam('${key}', this.value)">${options.map(o => `<option value="${esc(o)}"${o === value ? ' selected' : ''}>${esc(o)}</option>`).join('')}</select>`;
}

function search(value, placeholder) {
  return `<input type="search" placeholder="${esc(placeholder)}" value="${esc(value)}" oninput="clearTimeout(searchTimer); const v = this.value; searchTimer = setTimeout(() => setParam('q', v), 300)">`;
}

// ---------------------------------------------------------------------------
// Pages
// ---------------------------------------------------------------------------
function renderOverview(p) {
  const h = p.health;
  return kpis(p.quick_stats) +
    `<div class="grid three">${p.sections.map(s => card(s.title, statRows(s.rows))).join('')}</div>` +
    card('System Health',
      `<div class="stat-row"><span class="label">Overall</span><span>${h.overall} ${badge(h.badge)}</span></div>` +
      h.scores.map(s => scoreBar(s.bar, s.value, `<div class="breakdown">${esc(s.breakdown)}</div>`)).join('')) +
    card('Quick Navigation', `<div class="grid four">${p.quick_links.map(l => `<a class="quick" data-link href="${l.path}">${esc(l.label)}<p>${esc(l.description)}</p></a>`).join('')}</div>`);
}

function renderRewriter(p) {
  const l = p.latency;
  let out = kpis(p.kpis);
  out += `<div class="grid two">${card(p.zero_rate_chart.title, chart(p.zero_rate_chart), null, 'Percentage of queries that returned zero search results. Lower is better.')}${card(p.avg_results_chart.title, chart(p.avg_results_chart) + (p.improvement_percent ? `<div class="note">${num(p.improvement_percent)}% more results when rewritten</div>` : ''), null, 'Mean number of documents returned by search. Higher indicates better recall.')}</div>`;
  out += card('Query Rewrite Latency',
    `<div class="grid four">${[['Minimum', l.min_ms], ['Maximum', l.max_ms], ['Average', l.avg_ms], ['p95', l.p95_ms]].map(([t, v]) => `<div class="kpi"><div class="title">${t}</div><div class="value">${num(v)}<small>ms</small></div></div>`).join('')}</div>` +
    scoreBar({ label: 'Max vs Target', fill_pct: l.budget_fill_pct }, badge(l.badge)),
    `Performance statistics (target: ${num(l.target_ms)}ms)`);
  if (p.quality) {
    const q = p.quality;
    out += card('Answer Quality Scores',
      `<div class="grid two"><div><h3 class="hint">Rewritten</h3>${q.rewritten.map(b => scoreBar(b)).join('')}</div><div><h3 class="hint">Pass-through</h3>${q.passthrough.map(b => scoreBar(b)).join('')}</div></div>` +
      statRows(q.deltas.map(d => ({ label: d.dimension + ' delta', badge: { label: d.label, variant: d.variant } }))) +
      `<div class="stat-row"><span class="label">Total delta</span><span class="val">${esc(q.total_delta)}</span></div>`,
      null, 'LLM-as-judge scores (1-5 scale) evaluating answer quality. Higher is better.');
  }
  out += `<div class="grid two">${card('Top Matched Entities', `<table>${p.entities.rows.map(e => `<tr><td>${esc(e.entity)}</td><td class="num">${num(e.count, 0)}</td><td class="num">${num(e.share_pct)}%</td></tr>`).join('')}</table>`, null, 'Most frequently matched entities across queries.')}${card(p.entity_chart.title, chart(p.entity_chart))}</div>`;
  if (p.head_to_head) {
    const hh = p.head_to_head;
    out += card('Head to Head', `<div class="hint">${esc(hh.query)}</div><table><tr><th></th><th class="num">Results</th><th>Expanded query</th></tr>
      <tr><td>Rewritten</td><td class="num">${num(hh.treatment.resultCount, 0)}</td><td>${esc(hh.treatment.expandedQuery)} ${chips(hh.treatment.entitiesMatched)}</td></tr>
      <tr><td>Pass-through</td><td class="num">${num(hh.control.resultCount, 0)}</td><td>${esc(hh.control.expandedQuery)}</td></tr></table>
      <div class="center">${esc(hh.summary)}</div>`);
  }
  const t = p.queries;
  const rows = t.list.rows.map(r => `<tr class="row" data-key="${esc(r.key)}">
      <td>${esc(r.query)}</td><td>${chips(r.matched_entities)}</td><td class="num">${num(r.expansion_count, 0)}</td>
      <td class="num">${badge(r.rewrite_badge)}</td><td class="num">${num(r.result_count, 0)}</td></tr>` +
    (r.expanded ? `<tr class="details"><td colspan="5">${r.scores ? r.scores.map(b => scoreBar(b)).join('') : 'No per-query scores.'}</td></tr>` : '')).join('');
  out += card('Rewritten Queries',
    `<div class="filters">${search(t.search, 'Search queries...')}${select('entity', t.entity, t.entity_options)}</div>` +
    (t.list.total ? `<table><tr><th>Query</th><th>Entities</th><th class="num">Expansions</th><th class="num">Time</th><th class="num">Results</th></tr>${rows}</table>` : '<div class="empty">No rewritten queries match your filters.</div>') +
    note(t.list), `${t.list.shown} of ${t.list.total} queries shown`, 'Queries that were expanded with entity matches.');
  return out;
}

function renderAdoption(p) {
  const r = p.response_time;
  return kpis(p.kpis) +
    card(p.trend_chart.title, `<div class="stat-row"><span class="label">${p.busiest_day ? esc(p.busiest_day.label + ': ' + p.busiest_day.value) : ''}</span>${badge(p.peak_hour)}</div>` + chart(p.trend_chart), 'Last 30 days of production usage', 'Daily query volume over the past 30 days.') +
    `<div class="grid two">` +
      card('Average Response Time', `<div class="big">${num(r.seconds)}<small>s</small></div><div class="center">${num(r.millis, 0)}ms average</div><div class="stat-row"><span class="label">Performance</span>${badge(r.badge)}</div>`, 'LLM generation latency', 'Average time for LLM to generate responses.') +
      card('Top Users', `<table>${p.top_users.rows.map(u => `<tr><td>#${u.rank}</td><td>${esc(u.user)}</td><td class="num">${num(u.queries, 0)}</td><td class="num">${num(u.share_pct)}%</td></tr>`).join('')}</table>` + note(p.top_users), null, 'Most active users by query count.') +
    `</div>` +
    card('Usage Summary', `<div class="grid four">${p.usage_summary.map(s => `<div class="kpi"><div class="title">${esc(s.label)}</div><div class="value">${esc(s.value)}</div></div>`).join('')}</div>`, 'Key engagement metrics', 'Overall usage statistics.');
}

function renderFeedback(p) {
  const f = p.filters;
  const rows = p.items.rows.map(r => `<tr class="row" data-key="${esc(r.key)}">
      <td>${badge(r.badge)}</td><td>${esc(r.comment)}</td><td>${esc(r.category)}</td><td>${esc(r.user_name)}</td><td>${esc(r.date)}</td></tr>` +
    (r.details ? `<tr class="details"><td colspan="5"><div>${esc(r.details.full_comment)}</div><div class="hint">${esc(r.details.user_name)} &middot; ${esc(r.details.timestamp)} &middot; conversation ${esc(r.details.conversation_id)}</div></td></tr>` : '')).join('');
  return kpis(p.kpis) +
    `<div class="grid two">${card(p.category_chart.title, chart(p.category_chart), null, 'AI-categorized feedback themes.')}${card(p.trend_chart.title, chart(p.trend_chart), null, 'Feedback volume over time.')}</div>` +
    card('Feedback Details',
      `<div class="filters">${search(f.search, 'Search feedback...')}${select('category', f.category, f.category_options)}${select('type', f.polarity, f.polarity_options)}</div>` +
      (p.items.total ? `<table>${rows}</table>` : '<div class="empty">No feedback matches your filters.</div>') + note(p.items),
      `${p.items.shown} of ${p.items.total} items shown`, 'Filterable list of all feedback items.');
}

function renderContentHealth(p) {
  const f = p.filters;
  const rows = p.gaps.rows.map(r => `<tr class="row" data-key="${esc(r.key)}">
      <td>${esc(r.query)}<div class="hint">${esc(r.mode)}${r.entity_count ? ` &middot; ${r.entity_count} entities matched` : ''}</div></td><td class="num">${badge(r.badge)}</td></tr>` +
    (r.details ? `<tr class="details"><td colspan="2"><div><b>Full Query</b> ${esc(r.details.full_query)}</div>
      ${r.details.matched_entities.length ? `<div>${chips(r.details.matched_entities)}</div>` : ''}
      ${r.details.indexes_searched.length ? `<div class="hint">Indexes: ${esc(r.details.indexes_searched.join(', '))}</div>` : ''}
      ${r.details.root_cause ? `<div class="hint">Root cause: ${esc(r.details.root_cause)}</div>` : ''}
      <div class="action"><b>Recommended Action</b>${esc(r.details.recommended_action)}</div></td></tr>` : '')).join('');
  return kpis(p.kpis) +
    card('Content Health Score', scoreBar(p.score, p.score_display)) +
    card('Zero-Result Queries',
      `<div class="filters">${search(f.search, 'Search queries...')}${select('rewritten', f.rewritten, ['all', 'yes', 'no'])}</div>` +
      (p.gaps.total ? `<table>${rows}</table>` : `<div class="empty">${esc(p.empty_message)}</div>`) + note(p.gaps),
      `${p.gaps.shown} of ${p.gaps.total} queries shown`, 'Queries that returned no search results, indicating missing content.') +
    card('Content Improvement Recommendations',
      `<div class="grid two">${p.recommendations.map(r => `<div class="card"><h2>${badge({ label: r.title, variant: r.variant })}</h2><div class="hint">${esc(r.text)}</div></div>`).join('')}</div>`,
      'Based on zero-result query analysis', 'Suggested actions to improve content coverage.');
}

const RENDERERS = {
  'overview': renderOverview,
  'query-rewriter': renderRewriter,
  'adoption': renderAdoption,
  'feedback': renderFeedback,
  'content-health': renderContentHealth,
};

function render() {
  document.getElementById('nav').innerHTML = page.nav.map(n =>
    `<a data-link href="${n.path}" class="${n.active ? 'active' : ''}">${esc(n.label)}</a>`).join('');

  const body = page.body;
  const h = body.header;
  document.title = h.title + ' | Nexus IQ';
  const crumbs = page.breadcrumb.map(c => `<a data-link href="${c.path}">${esc(c.label)}</a>`).join(' / ');
  const renderer = RENDERERS[body.kind];
  document.getElementById('main').innerHTML =
    `<div class="crumbs">${crumbs}</div>
     <div class="page-header"><div><h1>${esc(h.title)}</h1><div class="subtitle">${esc(h.subtitle)}</div></div>${badge(h.badge)}</div>` +
    (renderer ? renderer(body) : '<div class="empty">Unknown page</div>');

  const input = document.querySelector('.filters input');
  if (input && document.activeElement === document.body && params().get('q')) {
    input.focus();
    input.setSelectionRange(input.value.length, input.value.length);
  }
}

// ---------------------------------------------------------------------------
// Init
// ---------------------------------------------------------------------------
load();
</script>
</body>
</html>"##;

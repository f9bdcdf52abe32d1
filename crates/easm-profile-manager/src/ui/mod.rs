pub async fn index() -> axum::response::Html<&'static str> {
    axum::response::Html(
        r#"
<!doctype html>
<html lang="en">
<head>
  <meta charset="utf-8"/>
  <meta name="viewport" content="width=device-width, initial-scale=1"/>
  <title>EASM Profile Manager</title>
  <style>
    :root {
      --bg: #f8fafc;
      --card: #ffffff;
      --line: #e2e8f0;
      --text: #0f172a;
      --muted: #64748b;
      --accent: #2563eb;
      --ok: #15803d;
      --err: #b91c1c;
    }
    * { box-sizing: border-box; }
    body { margin: 0; font-family: Inter, Segoe UI, Roboto, sans-serif; background: var(--bg); color: var(--text); }
    .layout { display: grid; grid-template-columns: 300px 1fr; min-height: 100vh; }
    aside { background: var(--card); border-right: 1px solid var(--line); padding: 20px; }
    main { padding: 24px; }
    h1 { margin: 0 0 4px; font-size: 1.7rem; }
    .subtitle { margin: 0 0 16px; color: var(--muted); }
    label { display: block; margin: 10px 0 6px; color: var(--muted); font-size: .88rem; }
    input[type=text], input[type=password], input[type=number] {
      width: 100%; border-radius: 8px; border: 1px solid var(--line); padding: 9px 11px; background: #fff;
    }
    .pair { display: grid; grid-template-columns: 1fr 1fr; gap: 8px; }
    button {
      width: 100%; border-radius: 8px; border: none; padding: 10px 12px; margin-top: 14px;
      background: var(--accent); color: #fff; font-weight: 600; cursor: pointer;
    }
    button.secondary { background: #e2e8f0; color: var(--text); }
    button:disabled { opacity: .5; cursor: default; }
    .log { margin-top: 14px; font-size: .85rem; }
    .log div { margin: 3px 0; }
    .ok { color: var(--ok); }
    .err { color: var(--err); }
    .toolbar { display: flex; gap: 12px; align-items: center; margin-bottom: 12px; }
    .toolbar input[type=text] { max-width: 420px; }
    .toolbar button { width: auto; margin: 0; }
    .meta { color: var(--muted); font-size: .85rem; }
    table { width: 100%; border-collapse: collapse; font-size: .9rem; background: var(--card); }
    th, td { padding: 8px 10px; border-bottom: 1px solid var(--line); text-align: left; }
    th { color: var(--muted); font-weight: 600; }
    .pill { display: inline-block; border-radius: 12px; padding: 4px 10px; color: #000; font-size: .85em; }
    @media (max-width: 900px) { .layout { grid-template-columns: 1fr; } }
  </style>
</head>
<body>
  <div class="layout">
    <aside>
      <h3>Configuration</h3>
      <label>API Gateway URL</label><input id="gatewayHost" type="text" placeholder="e.g., gateway.qg1.apps.qualysksa.com"/>
      <label>Base Username</label><input id="baseUsername" type="text" placeholder="e.g., easmrAkm"/>
      <div class="pair">
        <div><label>Start Number</label><input id="start" type="number" min="0" value="0"/></div>
        <div><label>End Number</label><input id="end" type="number" min="0" value="3"/></div>
      </div>
      <label>Password</label><input id="password" type="password"/>
      <button id="connectBtn">Connect</button>
      <button class="secondary" id="disconnectBtn">Disconnect</button>
      <div class="log" id="authLog"></div>
    </aside>

    <main>
      <h1>EASM Profile Manager</h1>
      <p class="subtitle" id="gatewayLabel">Not connected.</p>

      <div class="toolbar">
        <input id="search" type="text" placeholder="Filter by username, profile name, or status..."/>
        <button class="secondary" id="refreshBtn">Refresh</button>
        <button id="deleteBtn" disabled>Delete Selected (0 profiles)</button>
        <span class="meta" id="meta"></span>
      </div>

      <div class="log" id="actionLog"></div>

      <table>
        <thead>
          <tr>
            <th><input type="checkbox" id="selectAll"/></th>
            <th>Username</th><th>Profile Name</th><th>Status</th>
            <th>Last Configured On</th><th>Next Scheduled Sync On</th><th>Last Discovery Completed On</th>
          </tr>
        </thead>
        <tbody id="rows"></tbody>
      </table>
    </main>
  </div>

<script>
const REFRESH_MS = 30000;
let rows = [];
const $ = (id) => document.getElementById(id);

const api = async (url, opts = {}) => {
  const headers = Object.assign({ 'Content-Type': 'application/json' }, opts.headers || {});
  const resp = await fetch(url, Object.assign({}, opts, { headers }));
  if (!resp.ok) throw new Error(await resp.text());
  return resp.status === 204 ? null : resp.json();
};

const esc = (s) => String(s).replace(/[&<>"']/g, (c) => ({ '&': '&amp;', '<': '&lt;', '>': '&gt;', '"': '&quot;', "'": '&#39;' }[c]));

const logLine = (elId, text, ok) => {
  $(elId).insertAdjacentHTML('beforeend', `<div class="${ok ? 'ok' : 'err'}">${ok ? '✅' : '❌'} ${esc(text)}</div>`);
};

const selected = () => Array.from(document.querySelectorAll('input.row-select:checked'))
  .map((cb) => rows[Number(cb.dataset.idx)])
  .map((r) => ({ username: r.username, profileName: r.profileName }));

const syncDeleteButton = () => {
  const n = selected().length;
  $('deleteBtn').disabled = n === 0;
  $('deleteBtn').textContent = `Delete Selected (${n} profiles)`;
};

function render(data) {
  rows = data.rows;
  $('gatewayLabel').textContent = data.connected ? `Gateway: ${data.gatewayHost}` : 'Not connected.';
  $('meta').textContent = data.refreshedAt
    ? `${data.rows.length}/${data.total} rows · updated ${new Date(data.refreshedAt).toLocaleTimeString()}`
    : '';
  const all = $('selectAll').checked;
  const failures = data.authFailures.map((f) => `<tr><td></td><td>${esc(f.username)}</td><td>N/A</td>
    <td><span class="pill" style="background:#FCA5A5">Authentication Failed</span></td><td colspan="3">${esc(f.error)}</td></tr>`);
  const body = rows.map((r, idx) => `<tr>
    <td>${r.placeholder ? '' : `<input type="checkbox" class="row-select" data-idx="${idx}" ${all ? 'checked' : ''}/>`}</td>
    <td>${esc(r.username)}</td><td>${esc(r.profileName)}</td>
    <td><span class="pill" style="background:${r.statusColor}">${esc(r.status)}</span></td>
    <td>${esc(r.lastConfiguredOn)}</td><td>${esc(r.nextScheduledSyncOn)}</td><td>${esc(r.lastDiscoveryCompletedOn)}</td>
  </tr>`);
  $('rows').innerHTML = body.concat(failures).join('') || '<tr><td colspan="7">No profiles.</td></tr>';
  document.querySelectorAll('input.row-select').forEach((cb) => cb.onchange = syncDeleteButton);
  syncDeleteButton();
}

async function load() {
  const q = encodeURIComponent($('search').value);
  render(await api(`/api/profiles?q=${q}`));
}

$('connectBtn').onclick = async () => {
  $('authLog').innerHTML = '';
  try {
    const data = await api('/api/connect', {
      method: 'POST',
      body: JSON.stringify({
        gatewayHost: $('gatewayHost').value.trim(),
        baseUsername: $('baseUsername').value.trim(),
        start: Number($('start').value),
        end: Number($('end').value),
        password: $('password').value,
      }),
    });
    data.authenticated.forEach((u) => logLine('authLog', `${u}: Authenticated`, true));
    data.failed.forEach((f) => logLine('authLog', `${f.username}: ${f.error}`, false));
    await load();
  } catch (e) {
    logLine('authLog', e.message, false);
  }
};

$('disconnectBtn').onclick = async () => {
  await api('/api/disconnect', { method: 'POST' }).catch((e) => logLine('authLog', e.message, false));
  $('authLog').innerHTML = '';
  await load();
};

$('deleteBtn').onclick = async () => {
  const selections = selected();
  $('actionLog').innerHTML = '';
  try {
    const report = await api('/api/profiles/delete', { method: 'POST', body: JSON.stringify({ selections }) });
    if (report.succeeded.length) logLine('actionLog', `Successfully deleted ${report.succeeded.length} profiles`, true);
    report.failed.forEach((f) => logLine('actionLog', `Failed to delete ${f.profileName}: ${f.error}`, false));
  } catch (e) {
    logLine('actionLog', e.message, false);
  }
  $('selectAll').checked = false;
  await load();
};

$('refreshBtn').onclick = () => api('/api/refresh', { method: 'POST' }).then(load).catch((e) => logLine('actionLog', e.message, false));
$('search').oninput = () => load().catch(() => {});
$('selectAll').onchange = () => {
  document.querySelectorAll('input.row-select').forEach((cb) => cb.checked = $('selectAll').checked);
  syncDeleteButton();
};

load().catch(() => {});
setInterval(() => load().catch(() => {}), REFRESH_MS);
</script>
</body>
</html>
"#,
    )
}

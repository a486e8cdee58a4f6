// Single-page chat UI served at `/`. It talks to the JSON endpoints only.

pub const INDEX_HTML: &str = r#"<!doctype html>
<html lang="en">
<head>
<meta charset="utf-8">
<meta name="viewport" content="width=device-width, initial-scale=1">
<title>Campus Assist</title>
<style>
  body { font-family: system-ui, sans-serif; margin: 0; background: #f4f6f8; color: #1d2733; }
  header { background: #1d4e89; color: #fff; padding: 12px 20px; }
  main { display: flex; flex-wrap: wrap; gap: 16px; padding: 16px; }
  section { background: #fff; border-radius: 8px; padding: 12px; box-shadow: 0 1px 3px rgba(0,0,0,.1); }
  #chat { flex: 1 1 360px; display: flex; flex-direction: column; min-height: 420px; }
  #log { flex: 1; overflow-y: auto; }
  .msg { margin: 6px 0; white-space: pre-wrap; }
  .user { text-align: right; color: #1d4e89; }
  .bot { color: #1d2733; }
  form { display: flex; gap: 8px; margin-top: 8px; }
  input { flex: 1; padding: 8px; }
  #mapbox { flex: 1 1 420px; }
  #mapwrap { position: relative; }
  #mapwrap img { width: 100%; display: block; }
  .spot { position: absolute; width: 14px; height: 14px; margin: -7px 0 0 -7px; border-radius: 50%;
          background: #e4572e; border: 2px solid #fff; cursor: pointer; }
</style>
</head>
<body>
<header><strong>Campus Assist</strong> &middot; ask where things are</header>
<main>
  <section id="chat">
    <div id="log"></div>
    <form id="ask">
      <input id="q" autocomplete="off" placeholder="Where is the library?">
      <button>Ask</button>
    </form>
    <form id="support">
      <input id="m" autocomplete="off" placeholder="How are you feeling?">
      <button>Talk</button>
    </form>
  </section>
  <section id="mapbox">
    <div id="mapwrap">
      <img src="/map" alt="Campus map" onerror="this.alt='Map image not available'">
    </div>
  </section>
</main>
<script>
const log = document.getElementById('log');

function say(text, who) {
  const div = document.createElement('div');
  div.className = 'msg ' + who;
  div.textContent = text;
  log.appendChild(div);
  log.scrollTop = log.scrollHeight;
}

async function post(path, body) {
  const res = await fetch(path, {
    method: 'POST',
    headers: { 'Content-Type': 'application/json' },
    body: JSON.stringify(body),
  });
  return res.json();
}

async function ask(q) {
  say(q, 'user');
  const data = await post('/ask', { q });
  let text = data.answer;
  if (data.details) text += '\n\nDirections: ' + data.details;
  if (data.places) text += '\n' + data.places.map(p => '- ' + p).join('\n');
  say(text, 'bot');
}

document.getElementById('ask').addEventListener('submit', e => {
  e.preventDefault();
  const input = document.getElementById('q');
  const q = input.value.trim();
  input.value = '';
  if (q) ask(q);
});

document.getElementById('support').addEventListener('submit', async e => {
  e.preventDefault();
  const input = document.getElementById('m');
  const message = input.value.trim();
  input.value = '';
  if (!message) return;
  say(message, 'user');
  const data = await post('/support', { message });
  say(data.answer, 'bot');
});

fetch('/hotspots').then(r => r.json()).then(spots => {
  const box = document.getElementById('mapwrap');
  for (const s of spots) {
    const dot = document.createElement('div');
    dot.className = 'spot';
    dot.style.left = s.left + '%';
    dot.style.top = s.top + '%';
    dot.title = s.id;
    dot.addEventListener('click', () => ask('Where is ' + s.id + '?'));
    box.appendChild(dot);
  }
});
</script>
</body>
</html>
"#;

//! Browser front-end. Everything below is presentation; the relay contract
//! lives in `handlers::chat`.

use axum::response::Html;

pub async fn index() -> Html<&'static str> {
    Html(INDEX_HTML)
}

const INDEX_HTML: &str = r#"<!DOCTYPE html>
<html lang="en">
<head>
<meta charset="UTF-8">
<meta name="viewport" content="width=device-width, initial-scale=1.0">
<title>AI Doctor Symptom Checker</title>
<style>
  * { margin: 0; padding: 0; box-sizing: border-box; }
  body {
    min-height: 100vh;
    background: linear-gradient(#eff6ff, #fff);
    font-family: system-ui, sans-serif;
    color: #111827;
  }
  main { max-width: 56rem; margin: 0 auto; padding: 2rem 1rem; }
  header { text-align: center; margin-bottom: 2rem; }
  header h1 { font-size: 1.9rem; margin-bottom: .5rem; }
  header p { color: #4b5563; }
  .card { background: #fff; border: 1px solid #e5e7eb; border-radius: .75rem; display: flex; flex-direction: column; height: 600px; }
  .bar { display: flex; justify-content: space-between; align-items: center; padding: 1rem; border-bottom: 1px solid #e5e7eb; }
  .bar h2 { font-size: 1.1rem; color: #374151; }
  #messages { flex: 1; overflow-y: auto; padding: 1rem; display: flex; flex-direction: column; gap: 1rem; }
  .msg { max-width: 80%; padding: .75rem; border-radius: .5rem; line-height: 1.5; white-space: pre-wrap; }
  .msg.user { align-self: flex-end; background: #3b82f6; color: #fff; }
  .msg.assistant { align-self: flex-start; background: #f3f4f6; }
  .msg.error { align-self: flex-start; background: #fef2f2; color: #dc2626; border: 1px solid #fecaca; }
  .msg .who { display: block; font-size: .7rem; font-weight: 600; opacity: .7; margin-bottom: .25rem; }
  form { display: flex; gap: .5rem; padding: 1rem; border-top: 1px solid #e5e7eb; }
  input { flex: 1; padding: .5rem 1rem; border: 1px solid #d1d5db; border-radius: .5rem; font-size: 1rem; }
  button { padding: .5rem 1rem; border: 0; border-radius: .5rem; background: #2563eb; color: #fff; cursor: pointer; }
  button.ghost { background: transparent; color: #374151; }
  button:disabled { opacity: .5; cursor: default; }
</style>
</head>
<body>
<main>
  <header>
    <h1>AI Doctor Symptom Checker</h1>
    <p>Describe your symptoms in Thai or English, and I'll help assess your condition</p>
  </header>
  <div class="card">
    <div class="bar">
      <h2>Medical Consultation</h2>
      <button class="ghost" id="new-chat">+ New Chat</button>
    </div>
    <div id="messages"></div>
    <form id="composer">
      <input id="input" type="text" placeholder="Describe your symptoms..." autocomplete="off">
      <button id="send" type="submit">Send</button>
    </form>
  </div>
</main>
<script>
const WELCOME = "Hello! I am a doctor here to help you with your symptoms. Please describe your symptoms to me.";
const ERROR = "Sorry, there was an error processing your request. Please check your connection and try again.";
const CONFIG_MISSING = "API configuration is missing. Please check your environment variables.";
const LABELS = { user: "You", assistant: "Doctor", error: "Error" };

let messages = [];
let conversationId = "";
let loading = false;

const list = document.getElementById("messages");
const input = document.getElementById("input");
const send = document.getElementById("send");

function render() {
  list.innerHTML = "";
  for (const m of messages) {
    const div = document.createElement("div");
    div.className = "msg " + m.role;
    const who = document.createElement("span");
    who.className = "who";
    who.textContent = LABELS[m.role];
    div.appendChild(who);
    div.appendChild(document.createTextNode(m.content));
    list.appendChild(div);
  }
  if (loading) {
    const div = document.createElement("div");
    div.className = "msg assistant";
    div.textContent = "…";
    list.appendChild(div);
  }
  input.disabled = loading;
  send.disabled = loading;
  list.scrollTop = list.scrollHeight;
  if (!loading) input.focus();
}

async function submit(text) {
  text = text.trim();
  if (!text || loading) return;
  input.value = "";
  messages.push({ role: "user", content: text });
  loading = true;
  render();
  try {
    const resp = await fetch("/api/chat", {
      method: "POST",
      headers: { "Content-Type": "application/json" },
      body: JSON.stringify({ message: text, conversationId }),
    });
    if (!resp.ok) throw new Error("HTTP " + resp.status);
    const data = await resp.json();
    if (!data || typeof data.answer !== "string" || !data.answer) throw new Error("Invalid response format");
    if (data.conversation_id) conversationId = data.conversation_id;
    messages.push({ role: "assistant", content: data.answer });
  } catch (e) {
    console.error(e);
    messages.push({ role: "error", content: ERROR });
  } finally {
    loading = false;
    render();
  }
}

document.getElementById("composer").addEventListener("submit", (e) => {
  e.preventDefault();
  submit(input.value);
});

document.getElementById("new-chat").addEventListener("click", () => {
  messages = [{ role: "assistant", content: WELCOME }];
  conversationId = "";
  render();
});

fetch("/health")
  .then((r) => r.json())
  .then((h) => {
    messages = [h.upstream_configured
      ? { role: "assistant", content: WELCOME }
      : { role: "error", content: CONFIG_MISSING }];
    render();
  })
  .catch(() => {
    messages = [{ role: "error", content: CONFIG_MISSING }];
    render();
  });
</script>
</body>
</html>
"#;

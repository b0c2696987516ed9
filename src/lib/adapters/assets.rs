use axum::http::header;
use axum::response::IntoResponse;

/// Clears the new-todo form once a submission has gone through. Failed
/// submissions keep the entered value so it can be corrected.
pub const RESET_FORM_JS: &str = r#"document.addEventListener("turbo:submit-end", (event) => {
  const form = event.target;
  if (!(form instanceof HTMLFormElement)) return;
  if (!form.matches('[data-behavior~="reset-form"]')) return;
  if (event.detail.success) {
    form.reset();
  }
});
"#;

/// Entrance hook for rendered items: marks them on attachment so the
/// stylesheet's transition runs, both at load and when a stream patch
/// inserts new markup.
pub const TODO_ITEM_JS: &str = r#"const SELECTOR = '[data-behavior~="todo-item"]';

function enter(item) {
  item.classList.add("fade-in");
}

// Exit counterpart to enter(). Nothing triggers it: deletion is handled by
// the server's remove patch, which drops the element outright.
function leave(item) {
  item.classList.add("fade-out");
  setTimeout(() => item.remove(), 300);
}

document.querySelectorAll(SELECTOR).forEach(enter);

new MutationObserver((mutations) => {
  for (const mutation of mutations) {
    for (const node of mutation.addedNodes) {
      if (!(node instanceof Element)) continue;
      if (node.matches(SELECTOR)) enter(node);
      node.querySelectorAll(SELECTOR).forEach(enter);
    }
  }
}).observe(document.body, { childList: true, subtree: true });
"#;

pub const APPLICATION_CSS: &str = r#"body {
  font-family: system-ui, sans-serif;
  background: #f6f6f6;
  color: #222;
  margin: 0;
}

.container {
  max-width: 40rem;
  margin: 2rem auto;
  padding: 0 1rem;
}

.notice {
  background: #e6f4e6;
  border: 1px solid #9fd29f;
  border-radius: 4px;
  padding: 0.5rem 0.75rem;
}

.form-error {
  color: #b00020;
  margin: 0.25rem 0;
}

.new-todo {
  display: flex;
  gap: 0.5rem;
  margin-bottom: 1rem;
}

.new-todo input[type="text"] {
  flex: 1;
  padding: 0.5rem;
}

.todo-item {
  display: flex;
  align-items: center;
  gap: 0.75rem;
  background: #fff;
  border: 1px solid #ddd;
  border-radius: 4px;
  padding: 0.5rem 0.75rem;
  margin-bottom: 0.5rem;
}

.todo-item .todo-title {
  flex: 1;
}

.todo-item.completed {
  background: #f0f0f0;
}

.todo-item.completed .todo-title {
  text-decoration: line-through;
  color: #888;
}

.todo-edit-form {
  display: flex;
  align-items: center;
  gap: 0.5rem;
  margin-bottom: 0.5rem;
}

.todo-edit-form input[type="text"] {
  flex: 1;
  padding: 0.5rem;
}

.fade-in {
  animation: fade-in 0.3s ease-in;
}

.fade-out {
  animation: fade-out 0.3s ease-out forwards;
}

@keyframes fade-in {
  from { opacity: 0; transform: translateY(-0.25rem); }
  to   { opacity: 1; transform: none; }
}

@keyframes fade-out {
  from { opacity: 1; }
  to   { opacity: 0; }
}
"#;

pub async fn reset_form_js() -> impl IntoResponse {
    (
        [(header::CONTENT_TYPE, "text/javascript; charset=utf-8")],
        RESET_FORM_JS,
    )
}

pub async fn todo_item_js() -> impl IntoResponse {
    (
        [(header::CONTENT_TYPE, "text/javascript; charset=utf-8")],
        TODO_ITEM_JS,
    )
}

pub async fn application_css() -> impl IntoResponse {
    ([(header::CONTENT_TYPE, "text/css; charset=utf-8")], APPLICATION_CSS)
}

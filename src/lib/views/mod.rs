use crate::core::Todo;

/// State of a title form between render and re-render: the entered value and
/// the validation message, if any. A clean form is `FormState::default()`.
#[derive(Debug, Clone, Default)]
pub struct FormState {
    pub title: String,
    pub error: Option<String>,
}

impl FormState {
    pub fn invalid(title: impl Into<String>, error: impl Into<String>) -> Self {
        Self {
            title: title.into(),
            error: Some(error.into()),
        }
    }
}

/// DOM id of a todo's frame, shared by item markup and stream targets.
pub fn dom_id(id: i64) -> String {
    format!("todo_{id}")
}

pub fn escape_html(raw: &str) -> String {
    let mut escaped = String::with_capacity(raw.len());
    for ch in raw.chars() {
        match ch {
            '&' => escaped.push_str("&amp;"),
            '<' => escaped.push_str("&lt;"),
            '>' => escaped.push_str("&gt;"),
            '"' => escaped.push_str("&quot;"),
            '\'' => escaped.push_str("&#39;"),
            _ => escaped.push(ch),
        }
    }
    escaped
}

pub fn layout(title: &str, body: &str) -> String {
    format!(
        "<!DOCTYPE html>
<html lang=\"en\">
<head>
<meta charset=\"utf-8\">
<meta name=\"viewport\" content=\"width=device-width,initial-scale=1\">
<title>{title}</title>
<link rel=\"stylesheet\" href=\"/assets/application.css\">
<script type=\"module\" src=\"https://unpkg.com/@hotwired/turbo@8.0.4/dist/turbo.es2017-esm.js\"></script>
<script type=\"module\" src=\"/assets/reset_form.js\"></script>
<script type=\"module\" src=\"/assets/todo_item.js\"></script>
</head>
<body>
{body}
</body>
</html>",
        title = escape_html(title),
    )
}

fn error_line(error: Option<&str>) -> String {
    match error {
        Some(message) => format!("<p class=\"form-error\">{}</p>", escape_html(message)),
        None => String::new(),
    }
}

fn notice_line(notice: Option<&str>) -> String {
    match notice {
        Some(notice) => format!("<p class=\"notice\">{}</p>", escape_html(notice)),
        None => String::new(),
    }
}

/// The list page: flash notice, creation form, then items newest first
/// inside the `todos` container that `prepend` patches target.
pub fn index_page(todos: &[Todo], form: &FormState, notice: Option<&str>) -> String {
    let items = todos.iter().map(|todo| todo_item(todo)).collect::<String>();
    let body = format!(
        "<main class=\"container\">
<h1>Todos</h1>
{notice}
<form id=\"new_todo\" class=\"new-todo\" method=\"post\" action=\"/todos\" data-behavior=\"reset-form\">
<input type=\"text\" name=\"title\" value=\"{title}\" placeholder=\"What needs doing?\" autofocus>
<button type=\"submit\">Add todo</button>
</form>
{error}
<div id=\"todos\">
{items}</div>
</main>",
        notice = notice_line(notice),
        title = escape_html(&form.title),
        error = error_line(form.error.as_deref()),
    );
    layout("Todos", &body)
}

/// One rendered item. The surrounding turbo-frame lets the edit link swap
/// just this item, and its id is the target of replace/remove patches.
pub fn todo_item(todo: &Todo) -> String {
    let dom_id = dom_id(todo.id);
    let title = escape_html(&todo.title);
    let item_class = if todo.completed {
        "todo-item completed"
    } else {
        "todo-item"
    };
    let checked = if todo.completed { " checked" } else { "" };
    format!(
        "<turbo-frame id=\"{dom_id}\">
<div class=\"{item_class}\" data-behavior=\"todo-item\">
<form class=\"todo-toggle\" method=\"post\" action=\"/todos/{id}/toggle\" data-turbo-frame=\"_top\">
<input type=\"checkbox\" name=\"completed\" onchange=\"this.form.requestSubmit()\"{checked}>
</form>
<span class=\"todo-title\">{title}</span>
<a class=\"todo-edit\" href=\"/todos/{id}/edit\">Edit</a>
<form class=\"todo-delete\" method=\"post\" action=\"/todos/{id}\" data-turbo-frame=\"_top\">
<input type=\"hidden\" name=\"_method\" value=\"delete\">
<button type=\"submit\">Delete</button>
</form>
</div>
</turbo-frame>
",
        id = todo.id,
    )
}

/// The edit form, framed with the same id as the item it replaces.
pub fn edit_form(todo: &Todo, form: &FormState) -> String {
    let dom_id = dom_id(todo.id);
    format!(
        "<turbo-frame id=\"{dom_id}\">
<form class=\"todo-edit-form\" method=\"post\" action=\"/todos/{id}\" data-turbo-frame=\"_top\">
<input type=\"hidden\" name=\"_method\" value=\"patch\">
<input type=\"text\" name=\"title\" value=\"{title}\" autofocus>
{error}
<button type=\"submit\">Save</button>
<a href=\"/todos\">Cancel</a>
</form>
</turbo-frame>",
        id = todo.id,
        title = escape_html(&form.title),
        error = error_line(form.error.as_deref()),
    )
}

pub fn edit_page(todo: &Todo, form: &FormState) -> String {
    let body = format!(
        "<main class=\"container\">
<h1>Edit todo</h1>
{form}
</main>",
        form = edit_form(todo, form),
    );
    layout("Edit todo", &body)
}

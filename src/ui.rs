use crate::models::TodoItem;

pub fn render_index(items: &[TodoItem], left: u64) -> String {
    let rows: String = items.iter().map(render_item).collect();
    INDEX_HTML
        .replace("{{ITEMS}}", &rows)
        .replace("{{LEFT}}", &left.to_string())
}

fn render_item(item: &TodoItem) -> String {
    let class = if item.completed { "label completed" } else { "label" };
    format!(
        "      <li class=\"item\" data-id=\"{id}\">\n        <span class=\"{class}\">{text}</span>\n        <span class=\"fa fa-trash\" title=\"Delete\"></span>\n      </li>\n",
        id = escape_html(&item.id),
        text = escape_html(&item.text),
    )
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

const INDEX_HTML: &str = r#"<!DOCTYPE html>
<html lang="en">
<head>
  <meta charset="UTF-8" />
  <meta name="viewport" content="width=device-width, initial-scale=1.0" />
  <title>Todo List</title>
  <link rel="stylesheet" href="https://cdnjs.cloudflare.com/ajax/libs/font-awesome/4.7.0/css/font-awesome.min.css" />
  <link rel="stylesheet" href="/css/style.css" />
</head>
<body>
  <main class="app">
    <h1>Todo List</h1>
    <ul class="todoItems">
{{ITEMS}}    </ul>

    <h2>Left to do: <span id="left">{{LEFT}}</span></h2>

    <h2>Add A Todo</h2>
    <form action="/addTodo" method="POST">
      <input type="text" placeholder="Thing To Do" name="todoItem" />
      <input type="submit" value="Add" />
    </form>
  </main>

  <script src="/js/main.js"></script>
</body>
</html>
"#;

#[cfg(test)]
mod tests {
    use super::*;

    fn item(id: &str, text: &str, completed: bool) -> TodoItem {
        TodoItem {
            id: id.to_string(),
            text: text.to_string(),
            completed,
        }
    }

    #[test]
    fn renders_rows_and_remaining_count() {
        let items = vec![item("a1", "Buy milk", false), item("a2", "Walk dog", true)];
        let html = render_index(&items, 1);

        assert!(html.contains(r#"<li class="item" data-id="a1">"#));
        assert!(html.contains(r#"<span class="label">Buy milk</span>"#));
        assert!(html.contains(r#"<span class="label completed">Walk dog</span>"#));
        assert_eq!(html.matches("fa fa-trash").count(), 2);
        assert!(html.contains(r#"<span id="left">1</span>"#));
    }

    #[test]
    fn empty_list_renders_zero_left() {
        let html = render_index(&[], 0);
        assert!(!html.contains("class=\"item\""));
        assert!(html.contains(r#"<span id="left">0</span>"#));
        assert!(html.contains(r#"name="todoItem""#));
    }

    #[test]
    fn item_text_is_escaped() {
        let html = render_index(&[item("x", "<b>\"fish\" & chips</b>", false)], 1);
        assert!(html.contains("&lt;b&gt;&quot;fish&quot; &amp; chips&lt;/b&gt;"));
        assert!(!html.contains("<b>"));
    }
}

use std::fmt::Write;

use kanban_domain::{Board, Card, Document, List, DEFAULT_PRIORITY, DEFAULT_STATUS};

use super::layout::{escape, page};

const PRIORITIES: [&str; 4] = [DEFAULT_PRIORITY, "Low", "Medium", "High"];
const STATUSES: [&str; 4] = [DEFAULT_STATUS, "To Do", "In Progress", "Done"];

/// Render every board with its lists and cards. The markup carries the
/// ids the drag controller reads: `data-board-id` and `data-list-id` on
/// `.kanban-list` and `.kanban-cards`, plus `data-card-id` on each card.
pub fn render(document: &Document) -> String {
    let mut body = String::new();
    if document.boards.is_empty() {
        body.push_str("<p class=\"empty\">No boards yet.</p>\n");
    }
    for board in &document.boards {
        board_section(&mut body, board);
    }
    page("Dashboard", &body, true)
}

fn board_section(out: &mut String, board: &Board) {
    let _ = writeln!(
        out,
        r#"<section class="kanban-board" data-board-id="{id}">
<h2>{name}</h2>
<div class="kanban-lists">"#,
        id = board.id,
        name = escape(&board.name),
    );
    for list in &board.lists {
        list_column(out, board, list);
    }
    out.push_str("</div>\n</section>\n");
}

fn list_column(out: &mut String, board: &Board, list: &List) {
    let _ = writeln!(
        out,
        r#"<div class="kanban-list" data-board-id="{board_id}" data-list-id="{list_id}">
<header><h3>{name}</h3> <span class="kanban-list-count">{count}</span></header>
<div class="kanban-cards" data-board-id="{board_id}" data-list-id="{list_id}">"#,
        board_id = board.id,
        list_id = list.id,
        name = escape(&list.name),
        count = list.len(),
    );
    for card in &list.cards {
        card_item(out, board, list, card);
    }
    out.push_str("</div>\n");
    create_form(out, board, list);
    out.push_str("</div>\n");
}

fn card_item(out: &mut String, board: &Board, list: &List, card: &Card) {
    let _ = writeln!(
        out,
        r#"<article class="kanban-card" draggable="true" data-card-id="{id}" data-board-id="{board_id}" data-list-id="{list_id}">
<div class="card-badges"><span class="badge tag">{tag}</span> <span class="badge priority">{priority}</span> <span class="badge status">{status}</span></div>
<h4>{title}</h4>"#,
        id = card.id,
        board_id = board.id,
        list_id = list.id,
        tag = escape(&card.tag),
        priority = escape(&card.priority),
        status = escape(&card.status),
        title = escape(&card.title),
    );
    if !card.description.is_empty() {
        let _ = writeln!(out, "<p>{}</p>", escape(&card.description));
    }

    out.push_str("<dl class=\"card-meta\">");
    for (label, value) in [
        ("Created", &card.created_on),
        ("Start", &card.start_date),
        ("End", &card.end_date),
        ("Author", &card.author),
        ("Assignee", &card.assignee),
    ] {
        if !value.is_empty() {
            let _ = write!(out, "<dt>{}</dt><dd>{}</dd>", label, escape(value));
        }
    }
    out.push_str("</dl>\n");

    let _ = writeln!(
        out,
        r#"<details class="card-edit"><summary data-edit-btn>Edit</summary>
<form method="post" action="/editar-tarjeta">
<input type="hidden" name="cardId" value="{id}">
<input type="hidden" name="boardId" value="{board_id}">
<input type="hidden" name="listId" value="{list_id}">"#,
        id = card.id,
        board_id = board.id,
        list_id = list.id,
    );
    card_fields(out, Some(card));
    out.push_str("<button type=\"submit\">Save</button>\n</form>\n</details>\n</article>\n");
}

fn create_form(out: &mut String, board: &Board, list: &List) {
    let _ = writeln!(
        out,
        r#"<details class="card-create"><summary>Add card</summary>
<form method="post" action="/nueva-tarjeta">
<input type="hidden" name="boardId" value="{board_id}">
<input type="hidden" name="listId" value="{list_id}">"#,
        board_id = board.id,
        list_id = list.id,
    );
    card_fields(out, None);
    out.push_str("<button type=\"submit\">Add</button>\n</form>\n</details>\n");
}

fn select(out: &mut String, name: &str, options: &[&str], current: &str) {
    let _ = write!(out, "<select name=\"{}\">", name);
    let mut seen = false;
    for option in options {
        let selected = if *option == current {
            seen = true;
            " selected"
        } else {
            ""
        };
        let _ = write!(
            out,
            "<option value=\"{v}\"{selected}>{v}</option>",
            v = escape(option)
        );
    }
    // Keep values that are not in the stock list selectable.
    if !seen && !current.is_empty() {
        let _ = write!(
            out,
            "<option value=\"{v}\" selected>{v}</option>",
            v = escape(current)
        );
    }
    out.push_str("</select>\n");
}

fn text_input(out: &mut String, label: &str, name: &str, kind: &str, value: &str) {
    let _ = writeln!(
        out,
        r#"<label>{label} <input type="{kind}" name="{name}" value="{value}"></label>"#,
        value = escape(value),
    );
}

fn field<'a>(card: Option<&'a Card>, get: fn(&Card) -> &String) -> &'a str {
    card.map(|c| get(c).as_str()).unwrap_or_default()
}

/// Inputs shared by the create and edit forms, prefilled from `card`.
fn card_fields(out: &mut String, card: Option<&Card>) {
    let _ = writeln!(
        out,
        r#"<label>Title <input type="text" name="title" required value="{}"></label>"#,
        escape(field(card, |c| &c.title))
    );
    let _ = writeln!(
        out,
        r#"<label>Description <textarea name="description">{}</textarea></label>"#,
        escape(field(card, |c| &c.description))
    );
    select(out, "prioridad", &PRIORITIES, field(card, |c| &c.priority));
    text_input(out, "Tag", "tag", "text", field(card, |c| &c.tag));
    select(out, "estado", &STATUSES, field(card, |c| &c.status));
    text_input(out, "Start", "fecha_inicio", "date", field(card, |c| &c.start_date));
    text_input(out, "End", "fecha_fin", "date", field(card, |c| &c.end_date));
    text_input(out, "Author", "autor", "text", field(card, |c| &c.author));
    text_input(out, "Assignee", "responsable", "text", field(card, |c| &c.assignee));
}

//! HTML fragments for the todo-list pages.

use nook_web::escape_html;

use crate::queries::{Item, Store};

pub fn home_content(stores: &[Store]) -> String {
  let mut content = String::from(
    r##"<div class="row space-between mb-md">
      <h2>lists</h2>
      <button class="btn" hx-get="/stores/new" hx-target="#modal">+ add list</button>
    </div>"##,
  );
  content.push_str(&stores_grid(stores));
  content.push_str(r##"<div id="modal" class="mt-lg"></div>"##);
  content
}

pub fn stores_grid(stores: &[Store]) -> String {
  let mut content = String::from(r##"<div id="stores-container" class="list">"##);

  if stores.is_empty() {
    content.push_str(
      r##"<div class="panel center">
        <p class="muted">No stores yet. Create your first shopping list!</p>
      </div>"##,
    );
  }

  for store in stores {
    let unchecked = store.items.iter().filter(|i| !i.checked).count();

    content.push_str(&format!(
      r##"<article class="panel mb-md">
        <div class="row space-between mb-md">
          <h3>{name}</h3>
          <button class="btn btn-danger" hx-delete="/stores/{id}" hx-confirm="Delete this store and all items?" hx-target="#stores-container" hx-swap="outerHTML">delete</button>
        </div>
        <p class="muted mb-md">{unchecked} items to buy</p>
        <div id="store-{id}-items">"##,
      name = escape_html(&store.name),
      id = store.id,
    ));

    for item in &store.items {
      content.push_str(&item_row(item));
    }

    content.push_str(&format!(
      r##"</div>
        <form hx-post="/stores/{id}/items" hx-target="#store-{id}-items" hx-swap="beforeend" class="mt-md">
          <div class="field">
            <label>item</label>
            <input type="text" name="name" placeholder="Add item..." required>
          </div>
          <div class="field">
            <label>quantity</label>
            <input type="text" name="quantity" placeholder="Qty (optional)">
          </div>
          <div class="row">
            <button type="submit" class="btn">Add</button>
          </div>
        </form>
      </article>"##,
      id = store.id,
    ));
  }

  content.push_str("</div>");
  content
}

/// One item line; checked items render struck through.
pub fn item_row(item: &Item) -> String {
  let (checked_attr, name, quantity) = if item.checked {
    (
      "checked",
      format!("<del>{}</del>", escape_html(&item.name)),
      format!("<del>{}</del>", escape_html(&item.quantity)),
    )
  } else {
    ("", escape_html(&item.name), escape_html(&item.quantity))
  };

  format!(
    r##"<div class="row space-between mb-sm">
      <div class="row">
        <input type="checkbox" {checked_attr} hx-post="/items/{id}/toggle" hx-target="closest .space-between" hx-swap="outerHTML">
        <span>{name}</span>
        <span class="muted">{quantity}</span>
      </div>
      <div class="row">
        <span class="muted">@{owner}</span>
        <button class="btn btn-danger" hx-delete="/items/{id}" hx-target="closest .space-between" hx-swap="outerHTML">remove</button>
      </div>
    </div>"##,
    id = item.id,
    owner = escape_html(&item.username),
  )
}

pub fn new_store_form() -> &'static str {
  r##"<div class="panel">
    <h3>new store</h3>
    <form hx-post="/stores" hx-target="#modal" class="mt-md">
      <div class="field">
        <label>name</label>
        <input type="text" name="name" required placeholder="e.g., supermarket">
      </div>
      <div class="field">
        <label>color</label>
        <input type="color" name="color" value="#2563eb">
      </div>
      <div class="row mt-md">
        <button type="submit" class="btn btn-pop">Create</button>
        <button type="button" class="btn" onclick="this.closest('.panel').remove()">Cancel</button>
      </div>
    </form>
  </div>"##
}

#[cfg(test)]
mod tests {
  use super::*;

  #[test]
  fn grid_counts_unchecked_items() {
    let store = Store {
      id:    1,
      name:  "supermarket".to_owned(),
      color: "#3B82F6".to_owned(),
      items: vec![
        Item {
          id:       1,
          name:     "milk".to_owned(),
          quantity: "2".to_owned(),
          checked:  false,
          username: "alice".to_owned(),
        },
        Item {
          id:       2,
          name:     "eggs".to_owned(),
          quantity: String::new(),
          checked:  true,
          username: "bob".to_owned(),
        },
      ],
    };
    let html = stores_grid(std::slice::from_ref(&store));
    assert!(html.contains("1 items to buy"));
    assert!(html.contains("<del>eggs</del>"));
    assert!(html.contains("@alice"));
  }

  #[test]
  fn item_names_are_escaped() {
    let item = Item {
      id:       7,
      name:     "<script>x</script>".to_owned(),
      quantity: String::new(),
      checked:  false,
      username: "alice".to_owned(),
    };
    let html = item_row(&item);
    assert!(html.contains("&lt;script&gt;"));
    assert!(!html.contains("<script>"));
  }

  #[test]
  fn empty_grid_shows_placeholder() {
    assert!(stores_grid(&[]).contains("No stores yet."));
  }
}

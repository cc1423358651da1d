//! SQL queries for stores and items.
//!
//! Every owner-filtered statement takes the caller's full visibility set and
//! binds each username as a discrete parameter.

use nook_core::VisibilitySet;
use nook_store_sqlite::{Db, Result, placeholders};
use rusqlite::ToSql;

pub struct Store {
  pub id:    i64,
  pub name:  String,
  pub color: String,
  pub items: Vec<Item>,
}

pub struct Item {
  pub id:       i64,
  pub name:     String,
  pub quantity: String,
  pub checked:  bool,
  pub username: String,
}

fn item_from_row(row: &rusqlite::Row<'_>) -> rusqlite::Result<Item> {
  Ok(Item {
    id:       row.get(0)?,
    name:     row.get(1)?,
    quantity: row.get(2)?,
    checked:  row.get(3)?,
    username: row.get(4)?,
  })
}

/// All visible stores, each with its items (unchecked first, newest first).
pub async fn stores_with_items(db: &Db, visible: &VisibilitySet) -> Result<Vec<Store>> {
  let names = visible.names().to_vec();
  db.call(move |conn| {
    let sql = format!(
      "SELECT id, name, color FROM stores
       WHERE username IN ({})
       ORDER BY name",
      placeholders(names.len())
    );
    let mut stmt = conn.prepare(&sql)?;
    let headers = stmt
      .query_map(rusqlite::params_from_iter(names.iter()), |row| {
        Ok((row.get::<_, i64>(0)?, row.get::<_, String>(1)?, row.get::<_, String>(2)?))
      })?
      .collect::<rusqlite::Result<Vec<_>>>()?;

    let mut items_stmt = conn.prepare(
      "SELECT id, name, quantity, checked, username FROM items
       WHERE store_id = ?1
       ORDER BY checked ASC, created_at DESC",
    )?;

    let mut stores = Vec::with_capacity(headers.len());
    for (id, name, color) in headers {
      let items = items_stmt
        .query_map([id], item_from_row)?
        .collect::<rusqlite::Result<Vec<_>>>()?;
      stores.push(Store { id, name, color, items });
    }
    Ok(stores)
  })
  .await
}

pub async fn create_store(db: &Db, username: &str, name: &str, color: &str) -> Result<()> {
  let (username, name, color) = (username.to_owned(), name.to_owned(), color.to_owned());
  db.call(move |conn| {
    conn.execute(
      "INSERT INTO stores (name, username, color) VALUES (?1, ?2, ?3)",
      rusqlite::params![name, username, color],
    )?;
    Ok(())
  })
  .await
}

pub async fn delete_store(db: &Db, store_id: i64, visible: &VisibilitySet) -> Result<()> {
  let names = visible.names().to_vec();
  db.call(move |conn| {
    let sql = format!(
      "DELETE FROM stores WHERE id = ? AND username IN ({})",
      placeholders(names.len())
    );
    let mut args: Vec<&dyn ToSql> = vec![&store_id];
    for name in &names {
      args.push(name);
    }
    conn.execute(&sql, &args[..])?;
    Ok(())
  })
  .await
}

/// Whether `store_id` belongs to someone in the visibility set.
pub async fn store_accessible(db: &Db, store_id: i64, visible: &VisibilitySet) -> Result<bool> {
  let names = visible.names().to_vec();
  db.call(move |conn| {
    let sql = format!(
      "SELECT COUNT(*) FROM stores WHERE id = ? AND username IN ({})",
      placeholders(names.len())
    );
    let mut args: Vec<&dyn ToSql> = vec![&store_id];
    for name in &names {
      args.push(name);
    }
    let count: i64 = conn.query_row(&sql, &args[..], |row| row.get(0))?;
    Ok(count > 0)
  })
  .await
}

/// Insert an item and return it with its assigned row id.
pub async fn create_item(
  db: &Db,
  store_id: i64,
  username: &str,
  name: &str,
  quantity: &str,
) -> Result<Item> {
  let (username, name, quantity) = (username.to_owned(), name.to_owned(), quantity.to_owned());
  db.call(move |conn| {
    conn.execute(
      "INSERT INTO items (store_id, name, quantity, username) VALUES (?1, ?2, ?3, ?4)",
      rusqlite::params![store_id, name, quantity, username],
    )?;
    Ok(Item {
      id: conn.last_insert_rowid(),
      name,
      quantity,
      checked: false,
      username,
    })
  })
  .await
}

/// Flip an item's checked flag, scoped through its store's owner. Returns the
/// updated item, or `None` when the item is outside the caller's scope.
pub async fn toggle_item(db: &Db, item_id: i64, visible: &VisibilitySet) -> Result<Option<Item>> {
  let names = visible.names().to_vec();
  db.call(move |conn| {
    let scope = format!(
      "store_id IN (SELECT id FROM stores WHERE username IN ({}))",
      placeholders(names.len())
    );
    let mut args: Vec<&dyn ToSql> = vec![&item_id];
    for name in &names {
      args.push(name);
    }

    conn.execute(
      &format!("UPDATE items SET checked = NOT checked WHERE id = ? AND {scope}"),
      &args[..],
    )?;

    let item = conn
      .query_row(
        &format!(
          "SELECT id, name, quantity, checked, username FROM items WHERE id = ? AND {scope}"
        ),
        &args[..],
        item_from_row,
      )
      .map(Some)
      .or_else(|e| match e {
        rusqlite::Error::QueryReturnedNoRows => Ok(None),
        other => Err(other),
      })?;
    Ok(item)
  })
  .await
}

pub async fn delete_item(db: &Db, item_id: i64, visible: &VisibilitySet) -> Result<()> {
  let names = visible.names().to_vec();
  db.call(move |conn| {
    let sql = format!(
      "DELETE FROM items
       WHERE id = ? AND store_id IN (SELECT id FROM stores WHERE username IN ({}))",
      placeholders(names.len())
    );
    let mut args: Vec<&dyn ToSql> = vec![&item_id];
    for name in &names {
      args.push(name);
    }
    conn.execute(&sql, &args[..])?;
    Ok(())
  })
  .await
}

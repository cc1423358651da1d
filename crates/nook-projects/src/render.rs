//! HTML fragments for the projects pages.

use nook_web::escape_html;

use crate::{
  STAGES,
  queries::{LogEntry, Project, ProjectFilters},
};

pub fn home_content(projects: &[Project], filters: &ProjectFilters) -> String {
  let mut content = String::from(
    r##"<div class="row space-between mb-md">
      <button class="btn" hx-get="/projects/new" hx-target="#modal">add project</button>
    </div>"##,
  );

  let stage = filters.stage.as_deref().unwrap_or("");
  let kind = filters.kind.as_deref().unwrap_or("");

  content.push_str(r##"<div class="filter-bar mb-md">"##);

  let all_active = if stage.is_empty() && kind.is_empty() && filters.rating == 0 {
    " active"
  } else {
    ""
  };
  content.push_str(&format!(
    r##"<button class="chip{all_active}" hx-get="/?stage=&type=&rating=" hx-target="#projects-list">all</button>"##
  ));

  for s in STAGES {
    let active = if *s == stage { " active" } else { "" };
    content.push_str(&format!(
      r##"<button class="chip{active}" hx-get="/?stage={s}&type={kind}&rating={rating}" hx-target="#projects-list">{s}</button>"##,
      rating = filters.rating,
    ));
  }

  content.push_str("</div>");

  content.push_str(r##"<div id="projects-list" class="list">"##);
  content.push_str(&project_cards(projects));
  content.push_str("</div>");

  content.push_str(r##"<div id="modal" class="mt-lg"></div>"##);
  content
}

pub fn project_cards(projects: &[Project]) -> String {
  if projects.is_empty() {
    return r##"<div class="panel center"><p class="muted">No projects yet. Create your first project!</p></div>"##
      .to_owned();
  }

  let mut content = String::new();
  for p in projects {
    content.push_str(&format!(
      r##"<a href="/projects/{id}" class="list-item">
        <div class="list-item-top">
          <span class="item-name">{name}</span>
          <span class="stage {badge}">{stage}</span>
        </div>
        <p class="item-desc">{desc}</p>
        <div class="list-item-bottom">
          <span class="rating">{rating}</span>
          <span class="flags">{flags}</span>
        </div>
      </a>"##,
      id = p.id,
      name = escape_html(&p.short_name),
      badge = badge_class(&p.stage),
      stage = escape_html(&p.stage),
      desc = escape_html(&p.short_description),
      rating = rating_display(p.rating),
      flags = project_flags(p),
    ));
  }
  content
}

pub fn detail_content(p: &Project, entries: &[LogEntry]) -> String {
  let mut content = String::from(r##"<a href="/" class="back">&larr; back</a>"##);

  content.push_str(&format!(
    r##"<div class="list-item-top mb-sm">
      <h2>{name}</h2>
      <span class="stage {badge}">{stage}</span>
    </div>"##,
    name = escape_html(&p.short_name),
    badge = badge_class(&p.stage),
    stage = escape_html(&p.stage),
  ));

  if !p.short_description.is_empty() {
    content.push_str(&format!(
      r##"<p class="muted mb-md">{}</p>"##,
      escape_html(&p.short_description)
    ));
  }

  content.push_str(r##"<table class="meta-table">"##);
  content.push_str(&format!(
    r##"<tr><td>stage</td><td><span class="stage {badge}">{stage}</span></td></tr>"##,
    badge = badge_class(&p.stage),
    stage = escape_html(&p.stage),
  ));
  content.push_str(&format!(
    r##"<tr><td>rating</td><td>{}</td></tr>"##,
    rating_display(p.rating)
  ));
  if !p.website_url.is_empty() {
    let url = escape_html(&p.website_url);
    content.push_str(&format!(
      r##"<tr><td>website</td><td><a href="{url}" target="_blank">{url}</a></td></tr>"##
    ));
  }
  if !p.source_url.is_empty() {
    let url = escape_html(&p.source_url);
    content.push_str(&format!(
      r##"<tr><td>source</td><td><a href="{url}" target="_blank">{url}</a></td></tr>"##
    ));
  }
  let flags = project_flags(p);
  if !flags.is_empty() {
    content.push_str(&format!(r##"<tr><td>flags</td><td>{flags}</td></tr>"##));
  }
  content.push_str("</table>");

  content.push_str(&format!(
    r##"<div class="row mb-md">
      <button class="btn" hx-get="/projects/{id}/edit" hx-target="#modal">Edit</button>
      <button class="btn btn-danger" hx-delete="/projects/{id}" hx-confirm="Delete this project and all log entries?">Delete</button>
    </div>"##,
    id = p.id,
  ));

  if !p.full_description.is_empty() {
    content.push_str(&format!(
      r##"<div class="section-label mb-md">description</div>
      <p class="mb-lg">{}</p>"##,
      escape_html(&p.full_description)
    ));
  }

  content.push_str(&format!(
    r##"<div class="section-label mb-md">timeline</div>
    <div class="mb-md">
      <button class="btn" onclick="document.getElementById('new-entry-form').style.display='block'">Add Entry</button>
    </div>
    <form id="new-entry-form" hx-post="/projects/{id}/log" hx-target="#timeline" hx-swap="innerHTML" class="panel mb-md" hidden>
      <div class="field">
        <label>note</label>
        <input type="text" name="note" placeholder="What happened?" required>
      </div>
      <div class="field">
        <label>url</label>
        <input type="text" name="url" placeholder="https://...">
      </div>
      <div class="row mt-md">
        <button type="submit" class="btn btn-pop">Save</button>
        <button type="button" class="btn" onclick="this.closest('form').style.display='none'">Cancel</button>
      </div>
    </form>
    <div id="timeline" class="timeline">
      {timeline}
    </div>"##,
    id = p.id,
    timeline = timeline_html(entries, p.id),
  ));

  content.push_str(r##"<div id="modal" class="mt-lg"></div>"##);
  content
}

pub fn timeline_html(entries: &[LogEntry], project_id: i64) -> String {
  if entries.is_empty() {
    return r##"<p class="muted center">No entries yet.</p>"##.to_owned();
  }

  let mut content = String::new();
  for entry in entries {
    content.push_str(&log_entry_html(entry, project_id, false));
    for child in &entry.children {
      content.push_str(&log_entry_html(child, project_id, true));
    }
  }
  content
}

fn log_entry_html(entry: &LogEntry, project_id: i64, is_child: bool) -> String {
  let nested = if is_child { " nested" } else { "" };

  let url_part = if entry.url.is_empty() {
    String::new()
  } else {
    format!(
      r##" &mdash; <a href="{}" target="_blank">link</a>"##,
      escape_html(&entry.url)
    )
  };

  // Date part only; created_at is "YYYY-MM-DD HH:MM:SS".
  let date = entry.created_at.get(..10).unwrap_or(&entry.created_at);

  format!(
    r##"<article class="entry{nested}">
      <div class="entry-date">{date}</div>
      <div class="entry-text">{note}{url_part}</div>
      <div class="entry-actions">
        <button hx-get="/projects/{pid}/log/{id}/reply" hx-target="#reply-{id}" hx-swap="innerHTML">reply</button>
        <button hx-delete="/projects/{pid}/log/{id}" hx-target="#timeline" hx-swap="innerHTML" hx-confirm="Delete this entry?">delete</button>
      </div>
      <div id="reply-{id}"></div>
    </article>"##,
    note = escape_html(&entry.note),
    pid = project_id,
    id = entry.id,
  )
}

pub fn reply_form(project_id: i64, log_id: i64) -> String {
  format!(
    r##"<form hx-post="/projects/{project_id}/log/{log_id}/reply" hx-target="#timeline" hx-swap="innerHTML" class="mt-sm">
      <input type="text" name="note" placeholder="Add a reply..." required>
      <div class="mt-sm">
        <input type="text" name="url" placeholder="URL (optional)">
      </div>
      <div class="row mt-sm">
        <button type="submit" class="btn btn-pop">Reply</button>
        <button type="button" class="btn" onclick="this.closest('form').remove()">Cancel</button>
      </div>
    </form>"##
  )
}

/// Create/edit form; `project` present means edit.
pub fn project_form(project: Option<&Project>) -> String {
  let (title, action) = match project {
    Some(p) => ("edit project", format!(r##"hx-put="/projects/{}""##, p.id)),
    None => ("new project", r##"hx-post="/projects""##.to_owned()),
  };

  let field = |f: fn(&Project) -> &str| project.map(f).map(escape_html).unwrap_or_default();
  let short_name = field(|p| &p.short_name);
  let short_desc = field(|p| &p.short_description);
  let full_desc = field(|p| &p.full_description);
  let website_url = field(|p| &p.website_url);
  let source_url = field(|p| &p.source_url);

  let checked = |f: fn(&Project) -> bool| {
    if project.map(f).unwrap_or(false) {
      " checked"
    } else {
      ""
    }
  };
  let is_commercial = checked(|p| p.is_commercial);
  let is_open_source = checked(|p| p.is_open_source);
  let is_public = checked(|p| p.is_public);

  let stage = project.map(|p| p.stage.as_str()).unwrap_or("idea");
  let rating = project.map(|p| p.rating).unwrap_or(0);

  let mut stage_options = String::new();
  for s in STAGES {
    let selected = if *s == stage { " selected" } else { "" };
    stage_options.push_str(&format!(r##"<option value="{s}"{selected}>{s}</option>"##));
  }

  let mut rating_options = String::from(r##"<option value="0">no rating</option>"##);
  for i in 1..=5 {
    let selected = if i == rating { " selected" } else { "" };
    rating_options.push_str(&format!(r##"<option value="{i}"{selected}>{i}/5</option>"##));
  }

  format!(
    r##"<div class="panel">
      <h3>{title}</h3>
      <form {action} hx-target="#modal" class="mt-md">
        <div class="field">
          <label>name *</label>
          <input type="text" name="short_name" value="{short_name}" required placeholder="project name">
        </div>
        <div class="field">
          <label>tagline</label>
          <input type="text" name="short_description" value="{short_desc}" placeholder="short description">
        </div>
        <div class="field">
          <label>description</label>
          <textarea name="full_description" placeholder="detailed description...">{full_desc}</textarea>
        </div>
        <div class="field">
          <label>website url</label>
          <input type="url" name="website_url" value="{website_url}" placeholder="https://...">
        </div>
        <div class="field">
          <label>source code url</label>
          <input type="url" name="source_url" value="{source_url}" placeholder="https://github.com/user/repo">
        </div>
        <div class="field">
          <label>stage</label>
          <select name="stage">{stage_options}</select>
        </div>
        <div class="field">
          <label>rating</label>
          <select name="rating">{rating_options}</select>
        </div>
        <div class="field">
          <div class="checkbox-row">
            <label><input type="checkbox" name="is_commercial"{is_commercial}> commercial</label>
            <label><input type="checkbox" name="is_open_source"{is_open_source}> open source</label>
            <label><input type="checkbox" name="is_public"{is_public}> public</label>
          </div>
        </div>
        <div class="row mt-md">
          <button type="submit" class="btn btn-pop">Save</button>
          <button type="button" class="btn" onclick="this.closest('.panel').remove()">Cancel</button>
        </div>
      </form>
    </div>"##
  )
}

// ─── Helpers ─────────────────────────────────────────────────────────────────

fn badge_class(stage: &str) -> String {
  match stage {
    "development" => "stage-dev".to_owned(),
    other => format!("stage-{other}"),
  }
}

fn rating_display(rating: i64) -> String {
  if rating == 0 {
    return r##"<span class="rating empty-rating">&mdash;</span>"##.to_owned();
  }
  let mut html = String::from(r##"<span class="rating">"##);
  for i in 0..5 {
    if i < rating {
      html.push_str(r##"<span class="pip on"></span>"##);
    } else {
      html.push_str(r##"<span class="pip"></span>"##);
    }
  }
  html.push_str("</span>");
  html
}

fn project_flags(p: &Project) -> String {
  let mut flags = Vec::new();
  if p.is_commercial {
    flags.push("commercial");
  }
  if p.is_open_source {
    flags.push("open-source");
  }
  if p.is_public {
    flags.push("public");
  }
  flags.join(" &middot; ")
}

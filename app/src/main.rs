//! Terminal frontend for the todo client.
//!
//! # Design
//! A single-threaded event loop over stdin commands. Every pass plans the
//! collection query through the cache, executes any directed fetch over
//! ureq, and renders the form, the list (or its boundary's fallback), and
//! the prompt. Mutations go through the client and invalidate the
//! collection key on success; nothing is applied optimistically, so the
//! list shows the previous state until the refetch resolves.
//!
//! Failure routing mirrors the page layout: list-fetch errors trip the
//! list-local boundary ("Try again"), toggle/delete errors trip the global
//! one ("Reload app"), and a failed form submit is only logged — the draft
//! stays in the form.

use std::io::{self, BufRead, Write};
use std::time::{Duration, Instant};

use todoterm_core::{
    ErrorBoundary, HttpMethod, HttpRequest, HttpResponse, ItemRow, ListView, QueryCache,
    QueryPlan, QueryState, Todo, TodoClient, TodoForm, TODOS_KEY,
};
use tracing::{debug, info, warn};

/// Staleness window: a list older than this refetches in the background on
/// the next render pass.
const STALE_AFTER: Duration = Duration::from_secs(30);

fn main() -> io::Result<()> {
    dotenvy::dotenv().ok();
    tracing_subscriber::fmt()
        .with_env_filter(tracing_subscriber::EnvFilter::from_default_env())
        .with_writer(io::stderr)
        .init();

    let base_url =
        std::env::var("API_URL").unwrap_or_else(|_| "http://localhost:3000".to_string());
    info!(%base_url, "todoterm starting");

    let agent = ureq::Agent::config_builder()
        .http_status_as_error(false)
        .build()
        .new_agent();
    let client = TodoClient::new(&base_url);
    let mut cache: QueryCache<Vec<Todo>> = QueryCache::new(STALE_AFTER);
    let mut form = TodoForm::new();
    let mut list_boundary = ErrorBoundary::for_list();
    let mut global_boundary = ErrorBoundary::global();

    println!("commands: add <title> | toggle <n> | delete <n> | refresh | retry | quit");

    let stdin = io::stdin();
    let mut lines = stdin.lock().lines();

    loop {
        refresh_list(&agent, &client, &mut cache);
        render(&cache, &form, &mut list_boundary, &global_boundary);

        print!("> ");
        io::stdout().flush()?;
        let Some(line) = lines.next() else { break };
        let line = line?;
        let input = line.trim();
        let (command, rest) = match input.split_once(' ') {
            Some((command, rest)) => (command, rest.trim()),
            None => (input, ""),
        };

        match command {
            "" => {}
            "quit" | "q" | "exit" => break,
            "refresh" => cache.invalidate(TODOS_KEY),
            "retry" => {
                if global_boundary.is_tripped() {
                    global_boundary.reset();
                } else {
                    list_boundary.reset();
                    cache.reset(TODOS_KEY);
                }
            }
            "add" => {
                form.set_draft(rest);
                add_todo(&agent, &client, &mut cache, &mut form);
            }
            "toggle" => {
                if let Some(row) = pick_row(&cache, rest) {
                    toggle_todo(&agent, &client, &mut cache, &mut global_boundary, &row);
                }
            }
            "delete" => {
                if let Some(row) = pick_row(&cache, rest) {
                    delete_todo(&agent, &client, &mut cache, &mut global_boundary, &row);
                }
            }
            other => println!("unknown command: {other}"),
        }
    }

    Ok(())
}

/// One pass of the list's fetch loop: plan the collection query and execute
/// the fetch if the cache directs one. Overlap never happens here (the loop
/// is synchronous), but the cache still owns the decision.
fn refresh_list(agent: &ureq::Agent, client: &TodoClient, cache: &mut QueryCache<Vec<Todo>>) {
    if cache.plan(TODOS_KEY, Instant::now()) != QueryPlan::Fetch {
        return;
    }
    let result = execute(agent, client.build_list_todos())
        .and_then(|response| client.parse_list_todos(response).map_err(|e| e.to_string()));
    if let Err(message) = &result {
        debug!(%message, "list fetch failed");
    }
    cache.resolve(TODOS_KEY, result, Instant::now());
}

fn render(
    cache: &QueryCache<Vec<Todo>>,
    form: &TodoForm,
    list_boundary: &mut ErrorBoundary,
    global_boundary: &ErrorBoundary,
) {
    println!();
    if let Some(fallback) = global_boundary.fallback() {
        println!("{fallback}");
        println!("(type 'retry')");
        return;
    }

    println!("Add a todo");
    println!("  draft: {:?}  [{}]", form.draft(), form.submit_label());

    if let QueryState::Error(message) = cache.state(TODOS_KEY) {
        if !list_boundary.is_tripped() {
            list_boundary.catch(message);
        }
    }
    match list_boundary.fallback() {
        Some(fallback) => {
            println!("{fallback}");
            println!("(type 'retry')");
        }
        None => print!("{}", pad(ListView::from_state(cache.state(TODOS_KEY)).render())),
    }
}

fn pad(rendered: String) -> String {
    if rendered.ends_with('\n') {
        rendered
    } else {
        format!("{rendered}\n")
    }
}

fn add_todo(
    agent: &ureq::Agent,
    client: &TodoClient,
    cache: &mut QueryCache<Vec<Todo>>,
    form: &mut TodoForm,
) {
    let Some(draft) = form.submit() else {
        println!("nothing to add");
        return;
    };
    let result = client
        .build_create_todo(&draft)
        .map_err(|e| e.to_string())
        .and_then(|req| execute(agent, req))
        .and_then(|response| client.parse_create_todo(response).map_err(|e| e.to_string()));
    match result {
        Ok(created) => {
            debug!(id = %created.id, "todo added");
            form.submit_succeeded();
            cache.invalidate(TODOS_KEY);
        }
        Err(message) => {
            // Logged only; the draft stays in the form.
            warn!(%message, "failed to add todo");
            form.submit_failed();
        }
    }
}

fn toggle_todo(
    agent: &ureq::Agent,
    client: &TodoClient,
    cache: &mut QueryCache<Vec<Todo>>,
    global_boundary: &mut ErrorBoundary,
    row: &ItemRow,
) {
    let result = row
        .toggle_request(client)
        .map_err(|e| e.to_string())
        .and_then(|req| execute(agent, req))
        .and_then(|response| client.parse_update_todo(response).map_err(|e| e.to_string()));
    match result {
        Ok(updated) => {
            debug!(id = %updated.id, done = updated.done, "todo toggled");
            cache.invalidate(TODOS_KEY);
        }
        Err(message) => {
            warn!(%message, "failed to toggle todo");
            global_boundary.catch(message);
        }
    }
}

fn delete_todo(
    agent: &ureq::Agent,
    client: &TodoClient,
    cache: &mut QueryCache<Vec<Todo>>,
    global_boundary: &mut ErrorBoundary,
    row: &ItemRow,
) {
    let Some(req) = row.delete_request(client) else {
        println!("not done yet; toggle it first");
        return;
    };
    let result = execute(agent, req)
        .and_then(|response| client.parse_delete_todo(response).map_err(|e| e.to_string()));
    match result {
        Ok(deleted) => {
            debug!(id = %deleted.id, "todo deleted");
            cache.invalidate(TODOS_KEY);
        }
        Err(message) => {
            warn!(%message, "failed to delete todo");
            global_boundary.catch(message);
        }
    }
}

/// Resolve a 1-based row number from the currently rendered list.
fn pick_row(cache: &QueryCache<Vec<Todo>>, arg: &str) -> Option<ItemRow> {
    let n: usize = match arg.parse() {
        Ok(n) => n,
        Err(_) => {
            println!("expected a row number");
            return None;
        }
    };
    let ListView::Items(rows) = ListView::from_state(cache.state(TODOS_KEY)) else {
        println!("no todos to act on");
        return None;
    };
    if n == 0 || n > rows.len() {
        println!("no such row: {n}");
        return None;
    }
    Some(rows[n - 1].clone())
}

/// Execute an `HttpRequest` over ureq. Transport failures collapse into the
/// same single error signal as non-2xx responses.
fn execute(agent: &ureq::Agent, req: HttpRequest) -> Result<HttpResponse, String> {
    let response = match (req.method, req.body) {
        (HttpMethod::Get, _) => agent.get(&req.path).call(),
        (HttpMethod::Delete, _) => agent.delete(&req.path).call(),
        (HttpMethod::Post, Some(body)) => {
            agent.post(&req.path).content_type("application/json").send(body.as_bytes())
        }
        (HttpMethod::Post, None) => agent.post(&req.path).send_empty(),
        (HttpMethod::Patch, Some(body)) => {
            agent.patch(&req.path).content_type("application/json").send(body.as_bytes())
        }
        (HttpMethod::Patch, None) => agent.patch(&req.path).send_empty(),
    };
    let mut response = response.map_err(|e| format!("request failed: {e}"))?;

    let status = response.status();
    let status_text = status.canonical_reason().unwrap_or("").to_string();
    let body = response.body_mut().read_to_string().unwrap_or_default();

    Ok(HttpResponse {
        status: status.as_u16(),
        status_text,
        headers: Vec::new(),
        body,
    })
}

use super::render;
use crate::github::parse_repository_coordinate;
use crate::query::{
    BranchSelector, Debouncer, Explorer, SearchPage, SearchRequest, SearchSession, TermChange,
};
use crate::Result;
use tokio::io::{AsyncBufReadExt, BufReader};
use tokio::sync::mpsc;
use tracing::{debug, info};

/// Search for accounts and print up to `pages` pages of hits.
pub async fn search(explorer: &Explorer, term: &str, pages: u32, json: bool) -> Result<()> {
    let min_length = explorer.config().min_search_length;
    let mut session = explorer.search_session();

    if !matches!(session.set_term(term), TermChange::Started(_)) {
        println!("{}", render::disabled_banner(min_length));
        return Ok(());
    }

    let mut printed = 0;
    for _ in 0..pages.max(1) {
        match session.fetch_next_page().await {
            Ok(true) => {}
            Ok(false) => break,
            Err(e) => {
                println!("{}", render::error_banner(&e));
                return Err(e);
            }
        }

        let Some(page) = session.query().and_then(|q| q.pages().last()) else {
            break;
        };
        if json {
            render::print_json(page)?;
        } else if let Some(banner) = render::status_banner(session.status(), min_length) {
            println!("{banner}");
        } else {
            render::print_search_page(page, printed);
        }
        printed += page.items.len();

        if !session.has_next_page() {
            break;
        }
    }

    if !json && session.has_next_page() {
        println!("\nMore results available: rerun with --pages {}", pages + 1);
    }
    Ok(())
}

pub async fn account(explorer: &Explorer, login: &str, json: bool) -> Result<()> {
    match explorer.account_overview(login).await {
        Ok(overview) if json => render::print_json(&overview),
        Ok(overview) => {
            render::print_account_overview(&overview);
            Ok(())
        }
        Err(e) => {
            println!("{}", render::error_banner(&e));
            Err(e)
        }
    }
}

pub async fn repository(
    explorer: &Explorer,
    repo: &str,
    branch: Option<&str>,
    json: bool,
) -> Result<()> {
    let coordinate = parse_repository_coordinate(repo)?;

    let overview = match explorer.repository_overview(&coordinate, branch).await {
        Ok(overview) => overview,
        Err(e) => {
            println!("{}", render::error_banner(&e));
            return Err(e);
        }
    };

    if json {
        return render::print_json(&overview);
    }

    let mut selector = BranchSelector::new(
        &overview.details.repo.default_branch,
        &overview.details.branches,
        explorer.config().branch_display_limit,
    );
    selector.select(&overview.branch);
    render::print_repository_overview(&coordinate, &overview, &selector);
    Ok(())
}

type Completed = (SearchRequest, Result<SearchPage>);

/// Start fetching the session's next page on its own task.
fn spawn_next_page(
    session: &SearchSession,
    done: &mpsc::UnboundedSender<Completed>,
) -> Option<SearchRequest> {
    let request = session.next_request()?;
    let fetch = session.request(&request);
    let done = done.clone();
    let task_request = request.clone();
    tokio::spawn(async move {
        let result = fetch.await;
        // Nobody is listening once the loop has exited
        let _ = done.send((task_request, result));
    });
    Some(request)
}

/// Print every loaded page of the session. Returns the number of hits shown.
fn print_loaded(session: &SearchSession, min_length: usize) -> usize {
    if let Some(banner) = render::status_banner(session.status(), min_length) {
        println!("{banner}");
        return 0;
    }
    let mut printed = 0;
    for page in session.query().map(|q| q.pages()).unwrap_or_default() {
        render::print_search_page(page, printed);
        printed += page.items.len();
    }
    if session.has_next_page() {
        println!("(`:more` for the next page)");
    }
    printed
}

/// Search as you type.
///
/// Every stdin line is a new value of the search box. Lines go through the
/// debouncer, so only the last of a quick burst starts a query. Results for
/// a term that has since changed are dropped.
pub async fn interactive(explorer: &Explorer) -> Result<()> {
    let config = explorer.config().clone();
    let mut session = explorer.search_session();
    let (mut debouncer, mut terms) = Debouncer::new(config.debounce_window());
    let (done_tx, mut done_rx) = mpsc::unbounded_channel::<Completed>();
    let mut in_flight: Option<SearchRequest> = None;
    let mut printed = 0;

    let mut lines = BufReader::new(tokio::io::stdin()).lines();

    println!("Type a search term. `:more` loads the next page, `:quit` exits.");
    info!("Interactive search started");

    loop {
        tokio::select! {
            line = lines.next_line() => {
                let Some(line) = line? else {
                    break;
                };
                match line.trim() {
                    ":quit" => break,
                    ":more" => {
                        if in_flight.is_some() {
                            println!("{}", render::LOADING_BANNER);
                        } else if session.has_next_page() {
                            in_flight = spawn_next_page(&session, &done_tx);
                            println!("{}", render::LOADING_BANNER);
                        } else {
                            println!("No more results");
                        }
                    }
                    term => debouncer.schedule(term.to_string()),
                }
            }
            Some(term) = terms.recv() => {
                debug!("Debounced search term {:?}", term);
                match session.set_term(&term) {
                    TermChange::Unchanged => {}
                    TermChange::Disabled => {
                        in_flight = None;
                        println!("{}", render::disabled_banner(config.min_search_length));
                    }
                    TermChange::Restored(_) => {
                        in_flight = None;
                        printed = print_loaded(&session, config.min_search_length);
                    }
                    TermChange::Started(_) => {
                        printed = 0;
                        in_flight = spawn_next_page(&session, &done_tx);
                        println!("{}", render::LOADING_BANNER);
                    }
                }
            }
            Some((request, result)) = done_rx.recv() => {
                if in_flight.as_ref() == Some(&request) {
                    in_flight = None;
                }
                match result {
                    Ok(page) => {
                        if !session.apply_page(&request, page) {
                            continue;
                        }
                        let banner = render::status_banner(session.status(), config.min_search_length);
                        if let Some(banner) = banner {
                            println!("{banner}");
                        } else if let Some(page) = session.query().and_then(|q| q.pages().last()) {
                            render::print_search_page(page, printed);
                            printed += page.items.len();
                            if session.has_next_page() {
                                println!("(`:more` for the next page)");
                            }
                        }
                    }
                    Err(e) => {
                        if session.apply_error(&request, &e) {
                            println!("{}", render::error_banner(&e));
                        }
                    }
                }
            }
        }
    }

    debouncer.cancel();
    info!("Interactive search finished");
    Ok(())
}

//! Browser binding
//!
//! [`WebDom`] implements [`Dom`] over the live document, [`HttpFetcher`] loads
//! the index with `fetch`, and [`start`] (run by the `wasm-bindgen` glue on
//! module initialisation) wires every page event to a [`Page`] method.

use std::cell::RefCell;
use std::rc::Rc;

use futures::FutureExt;
use futures::future::LocalBoxFuture;
use js_sys::Promise;
use wasm_bindgen::convert::FromWasmAbi;
use wasm_bindgen::prelude::*;
use wasm_bindgen::JsCast;
use wasm_bindgen_futures::{JsFuture, spawn_local};
use web_sys::{
    Document, Event, EventTarget, FocusEvent, HtmlElement, HtmlInputElement, KeyboardEvent,
    MediaQueryListEvent, Node, Response, Window,
};

use crate::collapsible::button_id;
use crate::config::{CONFIG_ELEMENT_ID, SiteConfig};
use crate::dom::Dom;
use crate::error::{ConfigError, LoadError};
use crate::loader::{IndexFetcher, IndexLoader};
use crate::logging;
use crate::markup::SIDEBAR_CLICKABLE_CLASS;
use crate::model::SearchIndex;
use crate::page::Page;

type SharedPage = Rc<RefCell<Page<WebDom>>>;

/// [`Dom`] over a live `web_sys::Document`.
pub struct WebDom {
    document: Document,
}

impl WebDom {
    pub fn new(document: Document) -> Self {
        Self { document }
    }

    fn html_element(&self, id: &str) -> Option<HtmlElement> {
        self.document
            .get_element_by_id(id)?
            .dyn_into::<HtmlElement>()
            .ok()
    }
}

impl Dom for WebDom {
    fn exists(&self, id: &str) -> bool {
        self.document.get_element_by_id(id).is_some()
    }

    fn ids_with_class(&self, class: &str) -> Vec<String> {
        let elements = self.document.get_elements_by_class_name(class);
        (0..elements.length())
            .filter_map(|i| elements.item(i))
            .map(|e| e.id())
            .filter(|id| !id.is_empty())
            .collect()
    }

    fn has_class(&self, id: &str, class: &str) -> bool {
        self.document
            .get_element_by_id(id)
            .is_some_and(|e| e.class_list().contains(class))
    }

    fn toggle_class(&mut self, id: &str, class: &str) -> Option<bool> {
        self.document
            .get_element_by_id(id)?
            .class_list()
            .toggle(class)
            .ok()
    }

    fn text(&self, id: &str) -> Option<String> {
        self.html_element(id).map(|e| e.inner_text())
    }

    fn set_text(&mut self, id: &str, text: &str) -> bool {
        match self.html_element(id) {
            Some(element) => {
                element.set_inner_text(text);
                true
            }
            None => false,
        }
    }

    fn style(&self, id: &str, property: &str) -> Option<String> {
        self.html_element(id)?
            .style()
            .get_property_value(property)
            .ok()
            .filter(|value| !value.is_empty())
    }

    fn set_style(&mut self, id: &str, property: &str, value: &str) -> bool {
        let Some(element) = self.html_element(id) else {
            return false;
        };
        let style = element.style();
        if value.is_empty() {
            style.remove_property(property).is_ok()
        } else {
            style.set_property(property, value).is_ok()
        }
    }

    fn remove(&mut self, id: &str) -> bool {
        match self.document.get_element_by_id(id) {
            Some(element) => {
                element.remove();
                true
            }
            None => false,
        }
    }

    fn append_html(&mut self, parent_id: &str, _child_id: &str, html: &str) -> bool {
        self.document
            .get_element_by_id(parent_id)
            .is_some_and(|parent| parent.insert_adjacent_html("beforeend", html).is_ok())
    }
}

/// Loads resources relative to the current page with `window.fetch`.
pub struct HttpFetcher;

impl IndexFetcher for HttpFetcher {
    fn fetch(&self, url: &str) -> LocalBoxFuture<'static, Result<String, LoadError>> {
        let url = url.to_string();
        async move { fetch_text(&url).await }.boxed_local()
    }
}

async fn fetch_text(url: &str) -> Result<String, LoadError> {
    let network = |err: JsValue| LoadError::Network {
        url: url.to_string(),
        message: err
            .as_string()
            .unwrap_or_else(|| format!("{err:?}")),
    };

    let window = web_sys::window().ok_or_else(|| network(JsValue::from_str("no window")))?;
    let response: Response = JsFuture::from(window.fetch_with_str(url))
        .await
        .map_err(network)?
        .dyn_into()
        .map_err(network)?;
    if !response.ok() {
        return Err(LoadError::Status {
            url: url.to_string(),
            status: response.status(),
        });
    }
    let body = JsFuture::from(response.text().map_err(network)?)
        .await
        .map_err(network)?;
    body.as_string()
        .ok_or_else(|| LoadError::Parse("response body is not text".to_string()))
}

/// Resolves on the next macrotask, giving the browser a chance to handle input
/// and paint.
pub fn next_tick() -> LocalBoxFuture<'static, ()> {
    let promise = Promise::new(&mut |resolve, _reject| {
        let scheduled = web_sys::window()
            .map(|window| window.set_timeout_with_callback(&resolve).is_ok())
            .unwrap_or(false);
        if !scheduled {
            let _ = resolve.call0(&JsValue::NULL);
        }
    });
    async move {
        let _ = JsFuture::from(promise).await;
    }
    .boxed_local()
}

/// Entry point, run once the module is instantiated.
#[wasm_bindgen(start)]
pub fn start() -> Result<(), JsValue> {
    let window = web_sys::window().ok_or_else(|| JsValue::from_str("no window"))?;
    let document = window
        .document()
        .ok_or_else(|| JsValue::from_str("no document"))?;

    let (config, config_error) = match read_config(&document) {
        Ok(config) => (config, None),
        Err(err) => (SiteConfig::default(), Some(err)),
    };
    logging::init(&config.log_level);
    logging::setup_panic_hook();
    if let Some(err) = config_error {
        tracing::warn!(%err, "using default configuration");
    }

    let page: SharedPage = Rc::new(RefCell::new(Page::new(
        WebDom::new(document.clone()),
        config.clone(),
    )));
    let sections = page.borrow_mut().install();

    wire_sections(&document, &page, &sections)?;
    wire_sidebar(&document, &page, &config)?;
    wire_layout(&window, &page, &config)?;

    let loader = IndexLoader::new(HttpFetcher, config.index_url.clone());
    spawn_local(async move {
        match loader.load().await {
            Ok(index) => {
                if let Err(err) = wire_search(&document, &page, &config, index) {
                    tracing::error!(?err, "search unavailable");
                }
            }
            Err(err) => tracing::error!(%err, url = loader.url(), "search unavailable"),
        }
    });
    Ok(())
}

fn read_config(document: &Document) -> Result<SiteConfig, ConfigError> {
    match document
        .get_element_by_id(CONFIG_ELEMENT_ID)
        .and_then(|element| element.text_content())
    {
        Some(json) => SiteConfig::from_json(&json),
        None => Ok(SiteConfig::default()),
    }
}

fn listen<E>(
    target: &EventTarget,
    event: &str,
    handler: impl FnMut(E) + 'static,
) -> Result<(), JsValue>
where
    E: FromWasmAbi + 'static,
{
    let closure = Closure::<dyn FnMut(E)>::new(handler);
    target.add_event_listener_with_callback(event, closure.as_ref().unchecked_ref())?;
    // Listeners live as long as the page.
    closure.forget();
    Ok(())
}

/// Run `f` on the page unless it is already borrowed further up the stack
/// (a DOM call dispatching an event synchronously).
fn with_page(page: &SharedPage, f: impl FnOnce(&mut Page<WebDom>)) {
    match page.try_borrow_mut() {
        Ok(mut page) => f(&mut page),
        Err(_) => tracing::debug!("re-entrant event ignored"),
    }
}

fn wire_sections(document: &Document, page: &SharedPage, sections: &[String]) -> Result<(), JsValue> {
    for section in sections {
        let Some(button) = document.get_element_by_id(&button_id(section)) else {
            continue;
        };
        let page = page.clone();
        let section = section.clone();
        listen(&button, "click", move |_: Event| {
            with_page(&page, |page| {
                page.on_section_button(&section);
            });
        })?;
    }
    Ok(())
}

fn wire_sidebar(document: &Document, page: &SharedPage, config: &SiteConfig) -> Result<(), JsValue> {
    let links = document.get_elements_by_class_name(SIDEBAR_CLICKABLE_CLASS);
    for link in (0..links.length()).filter_map(|i| links.item(i)) {
        let page = page.clone();
        listen(&link, "click", move |_: Event| {
            with_page(&page, |page| page.on_sidebar_link());
        })?;
    }

    if let Some(button) = document.get_element_by_id(&config.ids.header_button) {
        let page = page.clone();
        listen(&button, "click", move |_: Event| {
            with_page(&page, |page| page.on_header_button());
        })?;
    }

    if let Some(sidebar) = document.get_element_by_id(&config.ids.sidebar) {
        let page = page.clone();
        let target: EventTarget = sidebar.clone().into();
        listen(&sidebar, "transitionend", move |event: Event| {
            // Transitions of links inside the sidebar bubble up too.
            if event.target().as_ref() != Some(&target) {
                return;
            }
            with_page(&page, |page| page.on_sidebar_transition_end());
        })?;
    }
    Ok(())
}

fn wire_layout(window: &Window, page: &SharedPage, config: &SiteConfig) -> Result<(), JsValue> {
    let Some(query) = window.match_media(&config.desktop_media_query())? else {
        tracing::warn!("matchMedia unavailable, following window width");
        return wire_width(window, page);
    };
    with_page(page, |page| page.on_viewport(query.matches()));

    let page = page.clone();
    listen(&query, "change", move |event: MediaQueryListEvent| {
        with_page(&page, |page| page.on_viewport(event.matches()));
    })
}

fn wire_width(window: &Window, page: &SharedPage) -> Result<(), JsValue> {
    observe_width(window, page);
    let page = page.clone();
    let target = window.clone();
    listen(window, "resize", move |_: Event| observe_width(&target, &page))
}

fn observe_width(window: &Window, page: &SharedPage) {
    if let Some(width) = window.inner_width().ok().and_then(|w| w.as_f64()) {
        with_page(page, |page| page.on_viewport_width(width as u32));
    }
}

fn wire_search(
    document: &Document,
    page: &SharedPage,
    config: &SiteConfig,
    index: Rc<SearchIndex>,
) -> Result<(), JsValue> {
    let input = document
        .get_element_by_id(&config.ids.search_input)
        .ok_or_else(|| JsValue::from_str("search input missing"))?
        .dyn_into::<HtmlInputElement>()?;
    let search = document
        .get_element_by_id(&config.ids.search)
        .ok_or_else(|| JsValue::from_str("search container missing"))?;

    for event in ["input", "focus"] {
        let page = page.clone();
        let index = index.clone();
        let field = input.clone();
        listen(&input, event, move |_: Event| {
            run_search(&page, index.clone(), field.value());
        })?;
    }

    listen(&search, "keydown", move |event: KeyboardEvent| {
        if event.key() != "Escape" {
            return;
        }
        if let Some(target) = event
            .target()
            .and_then(|t| t.dyn_into::<HtmlElement>().ok())
        {
            let _ = target.blur();
        }
    })?;

    let container: Node = search.clone().into();
    let page = page.clone();
    listen(&search, "focusout", move |event: FocusEvent| {
        let inside = event
            .related_target()
            .and_then(|t| t.dyn_into::<Node>().ok())
            .is_some_and(|node| container.contains(Some(&node)));
        if !inside {
            with_page(&page, |page| page.dismiss_results());
        }
    })?;

    tracing::debug!(entries = index.len(), "search enabled");
    Ok(())
}

fn run_search(page: &SharedPage, index: Rc<SearchIndex>, query: String) {
    let mut pending = None;
    with_page(page, |page| {
        pending = Some(page.start_search(index, &query, next_tick));
    });
    let Some(pending) = pending else {
        return;
    };

    let page = page.clone();
    spawn_local(async move {
        if let Some(results) = pending.await {
            with_page(&page, |page| {
                page.show_results(&results);
            });
        }
    });
}

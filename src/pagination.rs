//! Cursor-based pagination over list endpoints.
//!
//! A [`Pager`] holds a fetch function taking the continuation token. Pages
//! are requested lazily, one request per page, and the token only moves
//! forward. A missing or empty `nextPageToken` ends the sequence.

use std::collections::VecDeque;
use std::future::Future;
use std::sync::Arc;

use futures::future::BoxFuture;
use futures::Stream;

use crate::error::GenAiResult;

/// A page of results.
#[derive(Debug, Clone, PartialEq)]
pub struct Page<T> {
    /// Items on this page, in server order.
    pub items: Vec<T>,
    /// Token for the next page.
    pub next_page_token: Option<String>,
}

impl<T> Page<T> {
    /// Creates a new page. An empty token is treated as no token.
    pub fn new(items: Vec<T>, next_page_token: Option<String>) -> Self {
        Self {
            items,
            next_page_token: next_page_token.filter(|t| !t.is_empty()),
        }
    }

    /// Returns true if the server reported another page.
    pub fn has_next(&self) -> bool {
        self.next_page_token.is_some()
    }

    /// Returns the number of items in this page.
    pub fn len(&self) -> usize {
        self.items.len()
    }

    /// Returns true if this page is empty.
    pub fn is_empty(&self) -> bool {
        self.items.is_empty()
    }

    /// Maps the items in this page to a different type.
    pub fn map<U, F>(self, f: F) -> Page<U>
    where
        F: FnMut(T) -> U,
    {
        Page {
            items: self.items.into_iter().map(f).collect(),
            next_page_token: self.next_page_token,
        }
    }
}

type FetchFn<T> = Box<dyn FnMut(Option<String>) -> BoxFuture<'static, GenAiResult<Page<T>>> + Send>;

/// Lazy, forward-only sequence of items spread over pages.
pub struct Pager<T> {
    fetch: FetchFn<T>,
    next_token: Option<String>,
    buffer: VecDeque<T>,
    done: bool,
    pages_fetched: usize,
}

impl<T: Send + 'static> Pager<T> {
    /// Creates a pager around `fetch`, which is called with `None` for the
    /// first page and with the previous page's token afterwards.
    pub fn new<F, Fut>(mut fetch: F) -> Self
    where
        F: FnMut(Option<String>) -> Fut + Send + 'static,
        Fut: Future<Output = GenAiResult<Page<T>>> + Send + 'static,
    {
        Self {
            fetch: Box::new(move |token| Box::pin(fetch(token))),
            next_token: None,
            buffer: VecDeque::new(),
            done: false,
            pages_fetched: 0,
        }
    }

    async fn fetch_page(&mut self) -> GenAiResult<Page<T>> {
        let page = (self.fetch)(self.next_token.clone()).await?;
        self.pages_fetched += 1;

        match &page.next_page_token {
            Some(token) if !token.is_empty() => self.next_token = Some(token.clone()),
            _ => {
                self.next_token = None;
                self.done = true;
            }
        }

        Ok(page)
    }

    /// Fetches the next page. Items already buffered by [`Pager::next`] are
    /// returned first as a page of their own.
    pub async fn next_page(&mut self) -> GenAiResult<Option<Page<T>>> {
        if !self.buffer.is_empty() {
            let items = self.buffer.drain(..).collect();
            return Ok(Some(Page::new(items, self.next_token.clone())));
        }
        if self.done {
            return Ok(None);
        }
        self.fetch_page().await.map(Some)
    }

    /// Next item, fetching a page when the buffer runs dry.
    pub async fn next(&mut self) -> GenAiResult<Option<T>> {
        loop {
            if let Some(item) = self.buffer.pop_front() {
                return Ok(Some(item));
            }
            if self.done {
                return Ok(None);
            }
            let page = self.fetch_page().await?;
            self.buffer.extend(page.items);
        }
    }

    /// Drains every remaining page.
    pub async fn collect_all(mut self) -> GenAiResult<Vec<T>> {
        let mut all_items: Vec<T> = self.buffer.drain(..).collect();
        while !self.done {
            let page = self.fetch_page().await?;
            all_items.extend(page.items);
        }
        Ok(all_items)
    }

    /// Item stream; stops after the first error.
    pub fn into_stream(self) -> impl Stream<Item = GenAiResult<T>> + Send {
        futures::stream::try_unfold(self, |mut pager| async move {
            Ok(pager.next().await?.map(|item| (item, pager)))
        })
    }

    /// Returns true while items remain buffered or pages remain unfetched.
    pub fn has_next(&self) -> bool {
        !self.done || !self.buffer.is_empty()
    }

    /// Number of requests issued so far.
    pub fn pages_fetched(&self) -> usize {
        self.pages_fetched
    }

    /// Converts items as they are produced.
    pub fn map<U, F>(self, f: F) -> Pager<U>
    where
        U: Send + 'static,
        F: Fn(T) -> U + Send + Sync + 'static,
    {
        let f = Arc::new(f);
        let page_fn = Arc::clone(&f);
        let mut fetch = self.fetch;

        Pager {
            fetch: Box::new(move |token| {
                let fut = fetch(token);
                let page_fn = Arc::clone(&page_fn);
                Box::pin(async move { Ok(fut.await?.map(&*page_fn)) })
            }),
            next_token: self.next_token,
            buffer: self.buffer.into_iter().map(&*f).collect(),
            done: self.done,
            pages_fetched: self.pages_fetched,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use futures::TryStreamExt;
    use std::sync::Mutex;

    fn three_pages(requests: Arc<Mutex<Vec<Option<String>>>>) -> Pager<u32> {
        Pager::new(move |token: Option<String>| {
            requests.lock().unwrap().push(token.clone());
            async move {
                Ok(match token.as_deref() {
                    None => Page::new(vec![1, 2], Some("a".to_string())),
                    Some("a") => Page::new(vec![], Some("b".to_string())),
                    _ => Page::new(vec![3], Some(String::new())),
                })
            }
        })
    }

    #[tokio::test]
    async fn test_collect_all_follows_tokens() {
        let requests = Arc::new(Mutex::new(Vec::new()));
        let items = three_pages(Arc::clone(&requests)).collect_all().await.unwrap();

        assert_eq!(items, vec![1, 2, 3]);
        assert_eq!(
            *requests.lock().unwrap(),
            vec![None, Some("a".to_string()), Some("b".to_string())]
        );
    }

    #[tokio::test]
    async fn test_next_is_lazy() {
        let requests = Arc::new(Mutex::new(Vec::new()));
        let mut pager = three_pages(Arc::clone(&requests));

        assert_eq!(pager.pages_fetched(), 0);
        assert_eq!(pager.next().await.unwrap(), Some(1));
        assert_eq!(pager.next().await.unwrap(), Some(2));
        assert_eq!(pager.pages_fetched(), 1);

        assert_eq!(pager.next().await.unwrap(), Some(3));
        assert_eq!(pager.pages_fetched(), 3);
        assert_eq!(pager.next().await.unwrap(), None);
        assert!(!pager.has_next());
        assert_eq!(pager.pages_fetched(), 3);
    }

    #[tokio::test]
    async fn test_next_page_and_map() {
        let requests = Arc::new(Mutex::new(Vec::new()));
        let mut pager = three_pages(requests).map(|n| n * 10);

        let first = pager.next_page().await.unwrap().unwrap();
        assert_eq!(first.items, vec![10, 20]);
        assert!(first.has_next());

        let rest: Vec<u32> = pager.into_stream().try_collect().await.unwrap();
        assert_eq!(rest, vec![30]);
    }

    #[tokio::test]
    async fn test_error_stops_stream() {
        let pager: Pager<u32> = Pager::new(|_token| async {
            Err(crate::error::GenAiError::validation("page_size", "bad"))
        });
        let result: GenAiResult<Vec<u32>> = pager.into_stream().try_collect().await;
        assert!(result.unwrap_err().is_validation());
    }
}

use thiserror::Error;

#[derive(Debug, Error, PartialEq)]
pub enum PageError {
    #[error("page has to be greater than 0")]
    PageIsZero,
    #[error("page {page} is past the end ({page_count} pages)")]
    PastTheEnd { page: u32, page_count: u32 },
}

/// Fixed-size window over an already sorted listing. Pages are 1-based.
pub struct Paginator<'a, T> {
    items: &'a [T],
    page_size: u32,
    page_count: u32,
}

impl<'a, T> Paginator<'a, T> {
    pub fn from(items: &'a [T], page_size: u32) -> Self {
        // A page size of 0 would make every page empty and page_count
        // undefined, so it is clamped
        let page_size = page_size.max(1);
        let page_count = (items.len() as u32 + page_size - 1) / page_size;

        Paginator {
            items,
            page_size,
            page_count,
        }
    }

    pub fn page_count(&self) -> u32 {
        self.page_count
    }

    pub fn get_page(&self, page: u32) -> Result<&'a [T], PageError> {
        if page == 0 {
            return Err(PageError::PageIsZero);
        }
        if page > self.page_count {
            return Err(PageError::PastTheEnd {
                page,
                page_count: self.page_count,
            });
        }

        let start = ((page - 1) * self.page_size) as usize;
        let end = (start + self.page_size as usize).min(self.items.len());
        Ok(&self.items[start..end])
    }
}

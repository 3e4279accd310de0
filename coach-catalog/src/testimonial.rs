use serde::{Deserialize, Serialize};
use crate::CatalogError;

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct Testimonial {
    pub quote: String,
    pub author: String,
    pub role: String,
    pub company: String,
}

impl Testimonial {
    fn new(quote: &str, author: &str, role: &str, company: &str) -> Self {
        Self {
            quote: quote.to_string(),
            author: author.to_string(),
            role: role.to_string(),
            company: company.to_string(),
        }
    }
}

pub fn testimonials() -> Vec<Testimonial> {
    vec![
        Testimonial::new(
            "The CV review session transformed my resume completely. I went from zero responses to three interviews in just two weeks!",
            "Sarah Chen", "Software Engineer", "Tech Startup",
        ),
        Testimonial::new(
            "The networking strategy session gave me the confidence and templates I needed. I secured a referral that led to my dream job.",
            "Michael Torres", "Product Manager", "Fortune 500",
        ),
        Testimonial::new(
            "Interview prep was invaluable. The behavioral answer framework helped me ace my interviews and negotiate a 30% salary increase.",
            "Emily Johnson", "Marketing Director", "Global Agency",
        ),
        Testimonial::new(
            "Best investment in my career. The personalized guidance and action plan made all the difference in my job search.",
            "David Park", "Data Scientist", "AI Company",
        ),
        Testimonial::new(
            "The skills gap analysis opened my eyes to exactly what I needed to learn. Six months later, I landed a senior role.",
            "Rachel Williams", "UX Designer", "Design Studio",
        ),
    ]
}

/// Active-index cursor over a fixed, ordered list. Every move wraps.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct TestimonialRotator {
    index: usize,
    len: usize,
}

impl TestimonialRotator {
    pub fn new(len: usize) -> Result<Self, CatalogError> {
        if len == 0 {
            return Err(CatalogError::Empty);
        }
        Ok(Self { index: 0, len })
    }

    pub fn starting_at(len: usize, index: usize) -> Result<Self, CatalogError> {
        let mut rotator = Self::new(len)?;
        rotator.jump(index)?;
        Ok(rotator)
    }

    pub fn index(&self) -> usize {
        self.index
    }

    pub fn len(&self) -> usize {
        self.len
    }

    /// Timer-driven advance; same movement as `next`.
    pub fn tick(&mut self) -> usize {
        self.next()
    }

    pub fn next(&mut self) -> usize {
        self.index = (self.index + 1) % self.len;
        self.index
    }

    pub fn previous(&mut self) -> usize {
        self.index = (self.index + self.len - 1) % self.len;
        self.index
    }

    pub fn jump(&mut self, index: usize) -> Result<usize, CatalogError> {
        if index >= self.len {
            return Err(CatalogError::IndexOutOfRange { index, len: self.len });
        }
        self.index = index;
        Ok(self.index)
    }
}

//! Public site facade
//!
//! What the public pages read (active banners, approved testimonials,
//! gallery, rooms, restaurants, blog) and what visitors submit
//! (testimonials, room and table bookings, event proposals).

use shared::models::{
    Banner, BanquetGalleryImage, BlogPost, Booking, BookingCreate, Proposal, ProposalCreate,
    Restaurant, RestaurantBooking, RestaurantBookingCreate, Room, Testimonial,
    TestimonialSubmission,
};
use shared::ordering::sort_records;
use shared::{ListSort, Orderable};

use crate::client::HttpClient;
use crate::error::ClientResult;
use crate::resource::ResourceApi;

pub struct SiteClient<C> {
    banners: ResourceApi<C, Banner>,
    gallery: ResourceApi<C, BanquetGalleryImage>,
    testimonials: ResourceApi<C, Testimonial>,
    rooms: ResourceApi<C, Room>,
    restaurants: ResourceApi<C, Restaurant>,
    blogs: ResourceApi<C, BlogPost>,
    bookings: ResourceApi<C, Booking>,
    restaurant_bookings: ResourceApi<C, RestaurantBooking>,
    proposals: ResourceApi<C, Proposal>,
}

/// Active records only, sorted for display
fn visible<T: Orderable>(mut records: Vec<T>, sort: ListSort) -> Vec<T> {
    records.retain(|r| r.is_active());
    sort_records(&mut records, sort);
    records
}

impl<C: HttpClient + Clone> SiteClient<C> {
    pub fn new(client: C) -> Self {
        Self {
            banners: ResourceApi::new(client.clone()),
            gallery: ResourceApi::new(client.clone()),
            testimonials: ResourceApi::new(client.clone()),
            rooms: ResourceApi::new(client.clone()),
            restaurants: ResourceApi::new(client.clone()),
            blogs: ResourceApi::new(client.clone()),
            bookings: ResourceApi::new(client.clone()),
            restaurant_bookings: ResourceApi::new(client.clone()),
            proposals: ResourceApi::new(client),
        }
    }

    // ========== Read ==========

    pub async fn active_banners(&self) -> ClientResult<Vec<Banner>> {
        Ok(visible(self.banners.list().await?, ListSort::ByOrder))
    }

    pub async fn gallery(&self) -> ClientResult<Vec<BanquetGalleryImage>> {
        Ok(visible(self.gallery.list().await?, ListSort::ByOrder))
    }

    /// Approved testimonials, active first then by order
    pub async fn public_testimonials(&self) -> ClientResult<Vec<Testimonial>> {
        Ok(visible(self.testimonials.list().await?, ListSort::ActiveFirst))
    }

    pub async fn rooms(&self) -> ClientResult<Vec<Room>> {
        let mut rooms = self.rooms.list().await?;
        rooms.retain(|r| r.is_active);
        Ok(rooms)
    }

    pub async fn room(&self, id: &str) -> ClientResult<Room> {
        self.rooms.get(id).await
    }

    pub async fn restaurants(&self) -> ClientResult<Vec<Restaurant>> {
        let mut restaurants = self.restaurants.list().await?;
        restaurants.retain(|r| r.is_active);
        Ok(restaurants)
    }

    /// Published posts, newest first
    pub async fn blog_posts(&self) -> ClientResult<Vec<BlogPost>> {
        let mut posts = self.blogs.list().await?;
        posts.retain(|p| p.published);
        posts.sort_by(|a, b| b.created_at.cmp(&a.created_at));
        Ok(posts)
    }

    pub async fn blog_post(&self, id: &str) -> ClientResult<BlogPost> {
        self.blogs.get(id).await
    }

    // ========== Submit ==========

    /// Submitted testimonials are stored inactive until an admin approves
    /// them, whatever the rating.
    pub async fn submit_testimonial(
        &self,
        submission: TestimonialSubmission,
    ) -> ClientResult<Testimonial> {
        self.testimonials.create(&submission.into_create()).await
    }

    pub async fn book_room(&self, booking: &BookingCreate) -> ClientResult<Booking> {
        self.bookings.create(booking).await
    }

    pub async fn book_restaurant(
        &self,
        booking: &RestaurantBookingCreate,
    ) -> ClientResult<RestaurantBooking> {
        self.restaurant_bookings.create(booking).await
    }

    pub async fn send_proposal(&self, proposal: &ProposalCreate) -> ClientResult<Proposal> {
        self.proposals.create(proposal).await
    }
}

//! Reservation service
//!
//! Drives a visitor from a chosen room to a confirmed reservation:
//!
//! `Idle -> RoomSelected -> Confirming -> Confirmed | Rejected`
//!
//! The draft lives in the visitor's session between requests. Confirmation
//! writes two rows in sequence, the reservation and then its room restriction.
//! The pair is not transactional: if the second write fails the reservation
//! row remains without its restriction, the failure is reported and nothing
//! is rolled back.

use std::sync::Arc;

use crate::app::availability_service::AvailabilityService;
use crate::app::forms::GuestForm;
use crate::app::notification_queue::NotificationQueue;
use crate::app::reservation_session::ReservationSessionStore;
use crate::domain::entities::{
    DateRange, NewRoomRestriction, NotificationJob, Reservation, ReservationDraft,
    ReservationSummary, Room, RoomId, SessionId,
};
use crate::domain::ports::{
    ReservationRepository, RoomRepository, RoomRestrictionRepository, SessionStore,
};
use crate::error::{DomainError, PersistenceStage, WorkflowError};

/// Sender settings for the confirmation mail
#[derive(Debug, Clone)]
pub struct ConfirmationMail {
    pub from: String,
    /// Template to wrap the confirmation in, if any
    pub template: Option<String>,
}

/// Service orchestrating the booking flow
pub struct ReservationService<RM, RV, RS, SS>
where
    RM: RoomRepository,
    RV: ReservationRepository,
    RS: RoomRestrictionRepository,
    SS: SessionStore,
{
    availability: Arc<AvailabilityService<RM, RS>>,
    reservations: Arc<RV>,
    restrictions: Arc<RS>,
    drafts: Arc<ReservationSessionStore<SS>>,
    notifications: NotificationQueue,
    mail: ConfirmationMail,
}

impl<RM, RV, RS, SS> ReservationService<RM, RV, RS, SS>
where
    RM: RoomRepository,
    RV: ReservationRepository,
    RS: RoomRestrictionRepository,
    SS: SessionStore,
{
    pub fn new(
        availability: Arc<AvailabilityService<RM, RS>>,
        reservations: Arc<RV>,
        restrictions: Arc<RS>,
        drafts: Arc<ReservationSessionStore<SS>>,
        notifications: NotificationQueue,
        mail: ConfirmationMail,
    ) -> Self {
        Self {
            availability,
            reservations,
            restrictions,
            drafts,
            notifications,
            mail,
        }
    }

    /// Rooms free for the whole range; the range is remembered for a later
    /// `select_searched_room`
    pub async fn search(
        &self,
        session: &SessionId,
        range: &DateRange,
    ) -> Result<Vec<Room>, WorkflowError> {
        let rooms = self.availability.find_available_rooms(range).await?;
        self.drafts.put_search_range(session, range).await?;
        Ok(rooms)
    }

    /// Idle -> RoomSelected
    ///
    /// Stores a fresh draft for the room if it is free for the whole range.
    /// Any earlier draft in the session is replaced.
    pub async fn select_room(
        &self,
        session: &SessionId,
        room_id: &RoomId,
        range: &DateRange,
    ) -> Result<ReservationDraft, WorkflowError> {
        let room = self.availability.room(room_id).await.map_err(|e| match e {
            DomainError::NotFound(_) => WorkflowError::RoomNotFound(*room_id),
            other => WorkflowError::Storage(other),
        })?;

        if !self.availability.is_room_available(room_id, range).await? {
            tracing::info!(room_id = %room_id, range = %range, "Room no longer available at selection");
            return Err(WorkflowError::RoomUnavailable {
                room_id: *room_id,
                range: *range,
            });
        }

        let draft = ReservationDraft::new(room, *range);
        self.drafts.put(session, &draft).await?;
        tracing::debug!(room_id = %room_id, range = %range, "Room selected");

        Ok(draft)
    }

    /// Select a room from the results of the visitor's last search
    pub async fn select_searched_room(
        &self,
        session: &SessionId,
        room_id: &RoomId,
    ) -> Result<ReservationDraft, WorkflowError> {
        let range = self
            .drafts
            .search_range(session)
            .await?
            .ok_or(WorkflowError::NoDraft)?;
        self.select_room(session, room_id, &range).await
    }

    /// The draft currently held for the session
    pub async fn current_draft(&self, session: &SessionId) -> Result<ReservationDraft, WorkflowError> {
        self.drafts.get(session).await?.ok_or(WorkflowError::NoDraft)
    }

    /// Explicit abandonment; no-op if nothing was in progress
    pub async fn abandon(&self, session: &SessionId) -> Result<(), WorkflowError> {
        self.drafts.clear(session).await?;
        Ok(())
    }

    /// RoomSelected -> Confirming -> Confirmed | Rejected
    pub async fn confirm(
        &self,
        session: &SessionId,
        form: &GuestForm,
    ) -> Result<Reservation, WorkflowError> {
        let mut draft = self.current_draft(session).await?;

        // Keep what the visitor typed, valid or not, so the form can be redisplayed
        draft.guest = form.to_guest();
        let guest = match form.validate() {
            Ok(guest) => guest,
            Err(errors) => {
                self.drafts.put(session, &draft).await?;
                return Err(WorkflowError::Validation(errors));
            }
        };
        draft.guest = guest;
        self.drafts.put(session, &draft).await?;

        let room_id = draft.room.id;
        let range = draft.range;

        // Someone may have booked the room since it was selected
        let available = self
            .availability
            .is_room_available(&room_id, &range)
            .await
            .map_err(|source| WorkflowError::Persistence {
                stage: PersistenceStage::AvailabilityCheck,
                source,
            })?;
        if !available {
            tracing::info!(room_id = %room_id, range = %range, "Room taken between selection and confirmation");
            self.drafts.clear(session).await?;
            return Err(WorkflowError::RoomUnavailable { room_id, range });
        }

        let reservation = self
            .reservations
            .create(&draft.to_new_reservation())
            .await
            .map_err(|source| WorkflowError::Persistence {
                stage: PersistenceStage::Reservation,
                source,
            })?;
        let reservation_id = reservation.id;

        let new_restriction = NewRoomRestriction::for_reservation(reservation_id, room_id, range);
        let restriction = match self.restrictions.create(&new_restriction).await {
            Ok(restriction) => restriction,
            Err(source) => {
                tracing::error!(
                    reservation_id = %reservation_id,
                    room_id = %room_id,
                    range = %range,
                    error = %source,
                    "Reservation saved without its room restriction"
                );
                return Err(WorkflowError::Persistence {
                    stage: PersistenceStage::RoomRestriction,
                    source,
                });
            }
        };

        tracing::info!(
            reservation_id = %reservation_id,
            restriction_id = restriction.id,
            room_id = %room_id,
            range = %range,
            "Reservation confirmed"
        );

        self.notifications.enqueue(self.confirmation_job(&draft));

        // The booking is made; session bookkeeping failures must not undo that for the caller
        if let Err(e) = self.drafts.clear(session).await {
            tracing::warn!(reservation_id = %reservation_id, error = %e, "Failed to clear reservation draft");
        }
        let summary = ReservationSummary {
            reservation_id,
            room: draft.room.clone(),
            range,
            guest: draft.guest.clone(),
        };
        if let Err(e) = self.drafts.put_summary(session, &summary).await {
            tracing::warn!(reservation_id = %reservation_id, error = %e, "Failed to store reservation summary");
        }

        Ok(reservation)
    }

    /// One-shot summary of the booking just made
    pub async fn take_summary(
        &self,
        session: &SessionId,
    ) -> Result<Option<ReservationSummary>, WorkflowError> {
        Ok(self.drafts.take_summary(session).await?)
    }

    fn confirmation_job(&self, draft: &ReservationDraft) -> NotificationJob {
        let body = format!(
            "<strong>Reservation Confirmation</strong><br>\
             Dear {} {},<br>\
             your stay in {} from {} to {} is confirmed.",
            draft.guest.first_name,
            draft.guest.last_name,
            draft.room.name,
            draft.range.start(),
            draft.range.end(),
        );

        NotificationJob {
            to: draft.guest.email.clone(),
            from: self.mail.from.clone(),
            subject: "Reservation Confirmation".to_string(),
            template: self.mail.template.clone(),
            body,
        }
    }
}

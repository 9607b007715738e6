//! CastVoteHandler - Command handler for recording a member's vote.

use std::sync::Arc;

use tracing::{debug, info};

use crate::domain::canvass::Canvass;
use crate::domain::foundation::{MemberId, Reference, SessionId, Timestamp, VoteChoice};
use crate::domain::session::Session;
use crate::domain::vote::{Vote, VoteError, VoteRejection};
use crate::ports::{
    CanvassRepository, EligibilityChecker, SaveResult, SessionRepository, VoteRepository,
};

/// Command to cast a vote.
#[derive(Debug, Clone)]
pub struct CastVoteCommand {
    pub member_id: MemberId,
    pub session_id: SessionId,
    pub choice: VoteChoice,
}

/// Result of a recorded vote.
#[derive(Debug, Clone)]
pub struct CastVoteResult {
    pub vote: Vote,
    pub session: Session,
    /// Counters after this vote was applied.
    pub canvass: Canvass,
}

/// Handler for casting votes.
///
/// Checks run in a fixed order: session exists, member has not voted,
/// member is eligible, session still accepts votes. The vote store's
/// uniqueness constraint is the final word on duplicates; the canvass is
/// only incremented after the vote row was actually inserted.
pub struct CastVoteHandler {
    sessions: Arc<dyn SessionRepository>,
    votes: Arc<dyn VoteRepository>,
    canvasses: Arc<dyn CanvassRepository>,
    eligibility: Arc<dyn EligibilityChecker>,
}

impl CastVoteHandler {
    pub fn new(
        sessions: Arc<dyn SessionRepository>,
        votes: Arc<dyn VoteRepository>,
        canvasses: Arc<dyn CanvassRepository>,
        eligibility: Arc<dyn EligibilityChecker>,
    ) -> Self {
        Self {
            sessions,
            votes,
            canvasses,
            eligibility,
        }
    }

    pub async fn handle(&self, cmd: CastVoteCommand) -> Result<CastVoteResult, VoteError> {
        self.handle_at(cmd, Timestamp::now()).await
    }

    /// Casts the vote as of `now`.
    pub async fn handle_at(
        &self,
        cmd: CastVoteCommand,
        now: Timestamp,
    ) -> Result<CastVoteResult, VoteError> {
        // 1. Load session
        let session = self
            .sessions
            .find_by_id(&cmd.session_id)
            .await?
            .ok_or_else(|| VoteError::NotFoundReference(Reference::Session(cmd.session_id)))?;

        // 2. Fast-path duplicate check
        if self.votes.exists(session.id(), &cmd.member_id).await? {
            return Err(self.reject(&cmd, VoteRejection::AlreadyVoted));
        }

        // 3. Eligibility
        let eligibility = self.eligibility.check_eligibility(&cmd.member_id).await?;
        if !eligibility.able_to_vote {
            return Err(self.reject(&cmd, VoteRejection::Ineligible));
        }

        // 4. Deadline, from the timestamp as well as the persisted status
        if !session.accepts_votes_at(now) {
            return Err(self.reject(&cmd, VoteRejection::SessionClosed));
        }

        // 5. Persist; losing a concurrent race counts as a duplicate
        let vote = Vote::new(cmd.member_id.clone(), *session.id(), cmd.choice, now);
        if self.votes.insert(&vote).await? == SaveResult::AlreadyExists {
            return Err(self.reject(&cmd, VoteRejection::AlreadyVoted));
        }

        // 6. Apply to the tally
        let canvass = self
            .canvasses
            .increment(session.canvass_id(), cmd.choice)
            .await?;

        info!(
            vote_id = %vote.id(),
            session_id = %session.id(),
            choice = %cmd.choice,
            total_votes = canvass.total_votes(),
            "Vote recorded"
        );

        Ok(CastVoteResult {
            vote,
            session,
            canvass,
        })
    }

    fn reject(&self, cmd: &CastVoteCommand, reason: VoteRejection) -> VoteError {
        debug!(
            session_id = %cmd.session_id,
            member_id = %cmd.member_id,
            %reason,
            "Vote rejected"
        );
        VoteError::rejected(reason)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::adapters::memory::{InMemoryStore, StaticEligibilityChecker};
    use crate::domain::foundation::{AgendaId, CanvassId, DomainError, ErrorCode};
    use crate::domain::session::DeadlineMinutes;
    use crate::ports::Eligibility;
    use async_trait::async_trait;

    const OPENED_AT: i64 = 1_000;

    async fn store_with_session() -> (InMemoryStore, Session) {
        let store = InMemoryStore::new();
        let canvass = Canvass::new(CanvassId::new(), "Board Election");
        let session = Session::open(
            AgendaId::new(),
            *canvass.id(),
            Timestamp::from_unix_secs(OPENED_AT),
            DeadlineMinutes::DEFAULT,
        );
        SessionRepository::insert(&store, &session, &canvass)
            .await
            .unwrap();
        (store, session)
    }

    fn handler_with(
        store: &InMemoryStore,
        eligibility: Arc<dyn EligibilityChecker>,
    ) -> CastVoteHandler {
        CastVoteHandler::new(
            Arc::new(store.clone()),
            Arc::new(store.clone()),
            Arc::new(store.clone()),
            eligibility,
        )
    }

    fn handler(store: &InMemoryStore) -> CastVoteHandler {
        handler_with(store, Arc::new(StaticEligibilityChecker::allow_all()))
    }

    fn vote(member: &str, session: &Session, choice: VoteChoice) -> CastVoteCommand {
        CastVoteCommand {
            member_id: MemberId::new(member).unwrap(),
            session_id: *session.id(),
            choice,
        }
    }

    fn during() -> Timestamp {
        Timestamp::from_unix_secs(OPENED_AT + 30)
    }

    #[tokio::test]
    async fn yes_vote_increments_affirmative_and_total() {
        let (store, session) = store_with_session().await;

        let result = handler(&store)
            .handle_at(vote("a", &session, VoteChoice::Yes), during())
            .await
            .unwrap();

        assert_eq!(result.vote.choice(), VoteChoice::Yes);
        assert_eq!(result.vote.session_id(), session.id());
        assert_eq!(result.canvass.total_votes(), 1);
        assert_eq!(result.canvass.affirmative_votes(), 1);
        assert_eq!(result.canvass.negative_votes(), 0);
    }

    #[tokio::test]
    async fn second_vote_by_member_is_rejected_and_tally_unchanged() {
        let (store, session) = store_with_session().await;
        let handler = handler(&store);

        handler
            .handle_at(vote("a", &session, VoteChoice::Yes), during())
            .await
            .unwrap();
        let err = handler
            .handle_at(vote("a", &session, VoteChoice::No), during())
            .await
            .unwrap_err();

        assert_eq!(err, VoteError::Rejected(VoteRejection::AlreadyVoted));
        let canvass = CanvassRepository::find_by_id(&store, session.canvass_id())
            .await
            .unwrap()
            .unwrap();
        assert_eq!(canvass.total_votes(), 1);
        assert_eq!(store.vote_count().await, 1);
    }

    #[tokio::test]
    async fn ineligible_member_is_rejected() {
        let (store, session) = store_with_session().await;
        let handler = handler_with(
            &store,
            Arc::new(StaticEligibilityChecker::denying([MemberId::new("x").unwrap()])),
        );

        let err = handler
            .handle_at(vote("x", &session, VoteChoice::Yes), during())
            .await
            .unwrap_err();

        assert_eq!(err.code(), ErrorCode::MemberIneligible);
        assert_eq!(store.vote_count().await, 0);
    }

    #[tokio::test]
    async fn vote_at_closing_time_is_rejected_even_if_still_open() {
        let (store, session) = store_with_session().await;

        let err = handler(&store)
            .handle_at(vote("a", &session, VoteChoice::Yes), *session.closing_time())
            .await
            .unwrap_err();

        assert_eq!(err, VoteError::Rejected(VoteRejection::SessionClosed));
        assert_eq!(store.vote_count().await, 0);
    }

    #[tokio::test]
    async fn vote_on_persisted_closed_session_is_rejected() {
        let (store, session) = store_with_session().await;
        store.mark_closed(session.id()).await.unwrap();

        let err = handler(&store)
            .handle_at(vote("a", &session, VoteChoice::No), during())
            .await
            .unwrap_err();

        assert_eq!(err.code(), ErrorCode::SessionClosed);
    }

    #[tokio::test]
    async fn unknown_session_is_not_found() {
        let store = InMemoryStore::new();

        let err = handler(&store)
            .handle(CastVoteCommand {
                member_id: MemberId::new("a").unwrap(),
                session_id: SessionId::new(),
                choice: VoteChoice::Yes,
            })
            .await
            .unwrap_err();

        assert_eq!(err.code(), ErrorCode::SessionNotFound);
    }

    #[tokio::test]
    async fn duplicate_check_precedes_eligibility() {
        let (store, session) = store_with_session().await;
        handler(&store)
            .handle_at(vote("a", &session, VoteChoice::Yes), during())
            .await
            .unwrap();

        let strict = handler_with(
            &store,
            Arc::new(StaticEligibilityChecker::denying([MemberId::new("a").unwrap()])),
        );
        let err = strict
            .handle_at(vote("a", &session, VoteChoice::Yes), during())
            .await
            .unwrap_err();

        assert_eq!(err, VoteError::Rejected(VoteRejection::AlreadyVoted));
    }

    struct UnavailableEligibility;

    #[async_trait]
    impl EligibilityChecker for UnavailableEligibility {
        async fn check_eligibility(&self, _: &MemberId) -> Result<Eligibility, DomainError> {
            Err(DomainError::new(
                ErrorCode::EligibilityUnavailable,
                "connection refused",
            ))
        }
    }

    #[tokio::test]
    async fn eligibility_outage_is_not_a_rejection() {
        let (store, session) = store_with_session().await;

        let err = handler_with(&store, Arc::new(UnavailableEligibility))
            .handle_at(vote("a", &session, VoteChoice::Yes), during())
            .await
            .unwrap_err();

        assert!(matches!(err, VoteError::EligibilityUnavailable(_)));
        assert_eq!(store.vote_count().await, 0);
    }

    /// Vote store whose fast-path check misses a vote that a concurrent
    /// request has already inserted.
    struct RacingVoteRepository;

    #[async_trait]
    impl VoteRepository for RacingVoteRepository {
        async fn exists(&self, _: &SessionId, _: &MemberId) -> Result<bool, DomainError> {
            Ok(false)
        }
        async fn insert(&self, _: &Vote) -> Result<SaveResult, DomainError> {
            Ok(SaveResult::AlreadyExists)
        }
    }

    #[tokio::test]
    async fn losing_insert_race_leaves_canvass_untouched() {
        let (store, session) = store_with_session().await;
        let handler = CastVoteHandler::new(
            Arc::new(store.clone()),
            Arc::new(RacingVoteRepository),
            Arc::new(store.clone()),
            Arc::new(StaticEligibilityChecker::allow_all()),
        );

        let err = handler
            .handle_at(vote("a", &session, VoteChoice::Yes), during())
            .await
            .unwrap_err();

        assert_eq!(err, VoteError::Rejected(VoteRejection::AlreadyVoted));
        let canvass = CanvassRepository::find_by_id(&store, session.canvass_id())
            .await
            .unwrap()
            .unwrap();
        assert_eq!(canvass.total_votes(), 0);
    }
}

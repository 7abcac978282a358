// Copyright (c) Aptos Foundation
// SPDX-License-Identifier: Apache-2.0

//! The consensus state machine.
//!
//! The processor ingests one message at a time through [`Processor::on_proposal`]
//! and [`Processor::on_vote`], mutates the graph and the volatile cache, and
//! emits new proposals and votes through the network and the looper. Each
//! entry point runs to completion with no suspension points; concurrency and
//! dispatch order are the driver's concern.
//!
//! # Pipeline
//!
//! A proposal passes through confirm-parent (quorum check, parent
//! confirmation, cache pruning), apply-candidate (validity checks, graph
//! extension, caching) and then the voting steps, in which the processor's
//! role at the candidate's height decides what happens to its vote: the
//! collector processes it locally with priority, everyone else transmits it
//! to the collector, and the proposer does nothing because its vote already
//! travels inside the proposal.
//!
//! A vote is collected into the cache (after validity checks) and, once the
//! quorum threshold is reached, turned into the proposal for the next
//! height.
//!
//! The parent is confirmed *before* the candidate is validated against tip
//! and final: a proposal's parent certificate may advance the local view
//! far enough to make the proposal itself acceptable.

use tracing::debug;

use vertexbft_traits::{
    Builder, Cache, Error, Graph, Hash, Looper, Network, Proposal, Signer, Strategy, Verifier,
    Vertex, Vote,
};

/// The event-driven consensus processor.
///
/// Owns its eight collaborators; drivers reach them through the accessor
/// methods, for example to drain the looper between dispatches or to
/// inspect the graph.
pub struct Processor<N, G, B, S, SG, VF, C, L>
where
    N: Network,
    G: Graph,
    B: Builder,
    S: Strategy,
    SG: Signer,
    VF: Verifier,
    C: Cache,
    L: Looper,
{
    network: N,
    graph: G,
    builder: B,
    strategy: S,
    signer: SG,
    verifier: VF,
    cache: C,
    looper: L,
}

impl<N, G, B, S, SG, VF, C, L> Processor<N, G, B, S, SG, VF, C, L>
where
    N: Network,
    G: Graph,
    B: Builder,
    S: Strategy,
    SG: Signer,
    VF: Verifier,
    C: Cache,
    L: Looper,
{
    /// Create a processor from its collaborators.
    #[allow(clippy::too_many_arguments)]
    pub fn new(
        network: N,
        graph: G,
        builder: B,
        strategy: S,
        signer: SG,
        verifier: VF,
        cache: C,
        looper: L,
    ) -> Self {
        Processor {
            network,
            graph,
            builder,
            strategy,
            signer,
            verifier,
            cache,
            looper,
        }
    }

    /// Vote on the genesis tip to start the protocol.
    ///
    /// The graph must still be at its root: the tip at height zero. The
    /// vote goes to the height-zero collector, looped back with priority
    /// when that is ourselves and transmitted over the network otherwise,
    /// so exactly one vote is emitted.
    ///
    /// # Errors
    ///
    /// Returns [`Error::InvalidBootstrap`] when the tip is not at height
    /// zero; collaborator failures are surfaced as [`Error::Internal`].
    pub fn bootstrap(&mut self) -> Result<(), Error> {
        let self_id = self.signer.self_id();

        let tip = self.graph.tip()?;
        if tip.height != 0 {
            return Err(Error::InvalidBootstrap { tip });
        }

        self.loop_vote(self_id, &tip)?;
        self.cast_vote(self_id, &tip)?;

        Ok(())
    }

    /// Process one proposal.
    ///
    /// # Errors
    ///
    /// Any rejection along the pipeline is returned as the matching
    /// [`Error`] variant; earlier mutations are kept (a confirmed parent
    /// stays confirmed even if the candidate is then rejected, because the
    /// parent's quorum stands on its own).
    pub fn on_proposal(&mut self, proposal: &Proposal) -> Result<(), Error> {
        let self_id = self.signer.self_id();

        debug!(
            height = proposal.candidate.height,
            candidate = %proposal.candidate.id(),
            "processing proposal"
        );

        self.confirm_parent(proposal)?;
        self.apply_candidate(proposal)?;
        self.extract_vote(self_id, proposal);
        self.loop_vote(self_id, &proposal.candidate)?;
        self.cast_vote(self_id, &proposal.candidate)?;

        Ok(())
    }

    /// Process one vote.
    ///
    /// # Errors
    ///
    /// Any rejection along the pipeline is returned as the matching
    /// [`Error`] variant.
    pub fn on_vote(&mut self, vote: &Vote) -> Result<(), Error> {
        let self_id = self.signer.self_id();

        debug!(
            height = vote.height,
            candidate = %vote.candidate_id,
            signer = %vote.signer_id,
            "processing vote"
        );

        self.collect_vote(self_id, vote)?;
        self.propose_candidate(self_id, vote.height, vote.candidate_id)?;

        Ok(())
    }

    /// Confirm the parent of the proposed candidate.
    ///
    /// The parent carries a qualified majority, so none of its own validity
    /// rules are rechecked here; if an invalid vertex can gather a quorum
    /// the graph state is broken anyway. Once the parent is confirmed, all
    /// volatile data strictly below the candidate's height is useless and
    /// gets pruned.
    fn confirm_parent(&mut self, proposal: &Proposal) -> Result<(), Error> {
        self.verifier.quorum(proposal)?;

        self.graph.confirm(proposal.candidate.parent_id)?;

        // nothing lies strictly below height zero
        if let Some(cutoff) = proposal.candidate.height.checked_sub(1) {
            self.cache.clear(cutoff);
        }

        Ok(())
    }

    /// Validate the candidate and apply it to the graph and the cache.
    fn apply_candidate(&mut self, proposal: &Proposal) -> Result<(), Error> {
        let candidate = &proposal.candidate;

        // an already-applied candidate needs no reprocessing
        if self.graph.contains(candidate.id()) {
            return Err(Error::StaleProposal {
                proposal: Box::new(proposal.clone()),
            });
        }

        // only the leader of the height may propose at it
        let leader = self.strategy.leader(candidate.height);
        if candidate.proposer_id != leader {
            return Err(Error::InvalidProposer {
                proposal: Box::new(proposal.clone()),
                leader,
            });
        }

        // a proposal at or below the final height would create a sibling
        // of finalized state
        let finalized = self.graph.finalized()?;
        if candidate.height <= finalized.height {
            return Err(Error::ConflictingProposal {
                proposal: Box::new(proposal.clone()),
                finalized,
            });
        }

        // below the tip, a majority already agrees on a better sibling
        let tip = self.graph.tip()?;
        if candidate.height < tip.height {
            return Err(Error::ObsoleteProposal {
                proposal: Box::new(proposal.clone()),
                tip,
            });
        }

        self.verifier.proposal(proposal)?;

        self.graph.extend(*candidate)?;

        self.cache.store_proposal(proposal.clone())?;

        debug!(height = candidate.height, candidate = %candidate.id(), "candidate applied");
        Ok(())
    }

    /// Process the proposer's implicit vote when we are the collector.
    ///
    /// The vote is looped back with priority so a proposal is generated
    /// immediately when the proposer's vote is the only one missing from a
    /// qualified majority.
    fn extract_vote(&mut self, self_id: Hash, proposal: &Proposal) {
        if self_id != self.strategy.collector(proposal.candidate.height) {
            return;
        }
        self.looper.vote(proposal.vote());
    }

    /// Loop our own vote back to ourselves when we are the collector.
    fn loop_vote(&mut self, self_id: Hash, candidate: &Vertex) -> Result<(), Error> {
        // the proposer's vote is already implicit in the proposal
        if candidate.proposer_id == self_id {
            return Ok(());
        }

        // everyone else sends their vote to the collector over the network
        if self.strategy.collector(candidate.height) != self_id {
            return Ok(());
        }

        let vote = self.signer.vote(candidate)?;
        self.looper.vote(vote);
        Ok(())
    }

    /// Transmit our vote to the collector when we hold neither role.
    fn cast_vote(&mut self, self_id: Hash, candidate: &Vertex) -> Result<(), Error> {
        // the proposer's vote is already implicit in the proposal
        if candidate.proposer_id == self_id {
            return Ok(());
        }

        // the collector processed its own vote locally
        let collector = self.strategy.collector(candidate.height);
        if collector == self_id {
            return Ok(());
        }

        let vote = self.signer.vote(candidate)?;
        self.network.transmit(&vote, collector)?;
        Ok(())
    }

    /// Validate one vote and collect it into the cache.
    fn collect_vote(&mut self, self_id: Hash, vote: &Vote) -> Result<(), Error> {
        // votes on an already-applied candidate carry no new information
        if self.graph.contains(vote.candidate_id) {
            return Err(Error::StaleVote { vote: vote.clone() });
        }

        // below the final height the candidate can never be finalized; at
        // the final height the vote certifies the final vertex as the
        // parent of the next proposal, which is how the chain extends from
        // the finalized boundary
        let finalized = self.graph.finalized()?;
        if vote.height < finalized.height {
            return Err(Error::ConflictingVote {
                vote: vote.clone(),
                finalized,
            });
        }

        // below the tip, the network already agrees on a better candidate
        let tip = self.graph.tip()?;
        if vote.height < tip.height {
            return Err(Error::ObsoleteVote {
                vote: vote.clone(),
                tip,
            });
        }

        // votes only belong with the collector of their height
        let collector = self.strategy.collector(vote.height);
        if collector != self_id {
            return Err(Error::InvalidCollector {
                vote: vote.clone(),
                receiver: self_id,
                collector,
            });
        }

        self.verifier.vote(vote)?;

        self.cache.store_vote(vote.clone())?;

        debug!(height = vote.height, signer = %vote.signer_id, "vote collected");
        Ok(())
    }

    /// Build and publish the next proposal once the quorum is complete.
    fn propose_candidate(
        &mut self,
        self_id: Hash,
        height: u64,
        parent_id: Hash,
    ) -> Result<(), Error> {
        let threshold = self.strategy.threshold(height);
        let quorum = self.cache.quorum(height, parent_id)?;
        if (quorum.len() as u32) < threshold {
            return Ok(());
        }

        let arc_id = self.builder.arc()?;
        let candidate = Vertex {
            height: height + 1,
            parent_id,
            proposer_id: self_id,
            arc_id,
        };

        let proposal = self.signer.proposal(&candidate, quorum)?;

        // loop the proposal back first so it pre-empts external traffic
        self.looper.proposal(proposal.clone());
        self.network.broadcast(&proposal)?;

        debug!(
            height = candidate.height,
            candidate = %candidate.id(),
            "proposal broadcast"
        );
        Ok(())
    }

    /// The graph being driven forward.
    pub fn graph(&self) -> &G {
        &self.graph
    }

    /// Mutable access to the graph.
    pub fn graph_mut(&mut self) -> &mut G {
        &mut self.graph
    }

    /// The volatile message cache.
    pub fn cache(&self) -> &C {
        &self.cache
    }

    /// Mutable access to the volatile message cache.
    pub fn cache_mut(&mut self) -> &mut C {
        &mut self.cache
    }

    /// The outbound network transport.
    pub fn network(&self) -> &N {
        &self.network
    }

    /// Mutable access to the outbound network transport.
    pub fn network_mut(&mut self) -> &mut N {
        &mut self.network
    }

    /// The payload builder.
    pub fn builder(&self) -> &B {
        &self.builder
    }

    /// Mutable access to the payload builder.
    pub fn builder_mut(&mut self) -> &mut B {
        &mut self.builder
    }

    /// The priority self-message channel.
    pub fn looper(&self) -> &L {
        &self.looper
    }

    /// Mutable access to the priority self-message channel.
    pub fn looper_mut(&mut self) -> &mut L {
        &mut self.looper
    }

    /// The signature verifier.
    pub fn verifier(&self) -> &VF {
        &self.verifier
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::cache::Volatile;
    use crate::strategy::RoundRobin;
    use crate::testing::fixtures::{
        candidate, hash, proposal_for, root_vertex, signed_vote,
    };
    use crate::testing::{
        MockGraph, MockSigner, MockVerifier, RecordingLooper, RecordingNetwork, SequenceBuilder,
    };
    use vertexbft_traits::Attribution;

    type TestProcessor = Processor<
        RecordingNetwork,
        MockGraph,
        SequenceBuilder,
        RoundRobin,
        MockSigner,
        MockVerifier,
        Volatile,
        RecordingLooper,
    >;

    fn processor(self_id: Hash, participants: Vec<Hash>, root: Vertex) -> TestProcessor {
        Processor::new(
            RecordingNetwork::new(),
            MockGraph::new(root),
            SequenceBuilder::new(),
            RoundRobin::new(participants),
            MockSigner::new(self_id),
            MockVerifier::new(),
            Volatile::new(),
            RecordingLooper::new(),
        )
    }

    // participants [1, 2, 3]: leader(5) = hash(3), collector(5) = hash(1)
    fn trio() -> Vec<Hash> {
        vec![hash(1), hash(2), hash(3)]
    }

    #[test]
    fn test_bootstrap_requires_zero_tip() {
        let mut pro = processor(hash(1), vec![hash(1)], root_vertex());
        pro.graph_mut().tip = candidate(3, hash(9), Hash::ZERO, Hash::ZERO);

        let err = pro.bootstrap().unwrap_err();
        match err {
            Error::InvalidBootstrap { tip } => assert_eq!(tip.height, 3),
            other => panic!("expected invalid bootstrap, got {other:?}"),
        }
        assert_eq!(err_effects(&pro), (0, 0, 0, 0));
    }

    #[test]
    fn test_bootstrap_loops_vote_as_collector() {
        // single participant: we are the collector of height zero
        let mut pro = processor(hash(1), vec![hash(1)], root_vertex());

        pro.bootstrap().unwrap();

        assert_eq!(pro.looper().votes.len(), 1);
        let vote = &pro.looper().votes[0];
        assert_eq!(vote.height, 0);
        assert_eq!(vote.candidate_id, root_vertex().id());
        assert_eq!(vote.signer_id, hash(1));
        assert!(pro.network().transmissions.is_empty());
        assert!(pro.network().broadcasts.is_empty());
    }

    #[test]
    fn test_bootstrap_transmits_vote_to_collector() {
        // two participants: collector(0) = leader(1) = hash(2)
        let mut pro = processor(hash(1), vec![hash(1), hash(2)], root_vertex());

        pro.bootstrap().unwrap();

        assert!(pro.looper().votes.is_empty());
        assert_eq!(pro.network().transmissions.len(), 1);
        let (vote, recipient) = &pro.network().transmissions[0];
        assert_eq!(*recipient, hash(2));
        assert_eq!(vote.candidate_id, root_vertex().id());
    }

    #[test]
    fn test_bootstrap_emits_exactly_one_vote() {
        for participants in [vec![hash(1)], vec![hash(1), hash(2)], trio()] {
            let mut pro = processor(hash(1), participants, root_vertex());
            pro.bootstrap().unwrap();
            let emitted = pro.looper().votes.len() + pro.network().transmissions.len();
            assert_eq!(emitted, 1, "bootstrap must emit exactly one vote");
        }
    }

    fn err_effects(pro: &TestProcessor) -> (usize, usize, usize, usize) {
        (
            pro.looper().votes.len(),
            pro.looper().proposals.len(),
            pro.network().transmissions.len(),
            pro.network().broadcasts.len(),
        )
    }

    // a valid height-5 proposal by the leader hash(3) on a parent the
    // graph can confirm
    fn height_five_proposal() -> Proposal {
        let vertex = candidate(5, hash(10), hash(3), hash(20));
        proposal_for(vertex, &[hash(1), hash(2)])
    }

    #[test]
    fn test_on_proposal_voter_transmits_to_collector() {
        // hash(2) is neither leader(5) nor collector(5)
        let mut pro = processor(hash(2), trio(), root_vertex());
        let proposal = height_five_proposal();

        pro.on_proposal(&proposal).unwrap();

        // parent confirmed, candidate applied and cached
        assert_eq!(pro.graph().confirmations(hash(10)), 1);
        assert!(pro.graph().contains(proposal.candidate.id()));
        assert!(pro.cache().proposal_by(5, hash(3)).is_some());

        // vote goes point-to-point to the collector, nothing is looped
        assert_eq!(pro.looper().votes.len(), 0);
        assert_eq!(pro.network().transmissions.len(), 1);
        let (vote, recipient) = &pro.network().transmissions[0];
        assert_eq!(*recipient, hash(1));
        assert_eq!(vote.candidate_id, proposal.candidate.id());
        assert!(pro.network().broadcasts.is_empty());
    }

    #[test]
    fn test_on_proposal_collector_loops_both_votes() {
        // hash(1) is collector(5): it loops the proposer's implicit vote
        // and its own, and transmits nothing
        let mut pro = processor(hash(1), trio(), root_vertex());
        let proposal = height_five_proposal();

        pro.on_proposal(&proposal).unwrap();

        assert_eq!(pro.looper().votes.len(), 2);
        assert_eq!(pro.looper().votes[0], proposal.vote());
        assert_eq!(pro.looper().votes[1].signer_id, hash(1));
        assert!(pro.network().transmissions.is_empty());
        assert!(pro.network().broadcasts.is_empty());
    }

    #[test]
    fn test_on_proposal_proposer_stays_silent() {
        // hash(3) proposed the candidate itself; its vote is implicit and
        // it is not the collector, so no vote is emitted at all
        let mut pro = processor(hash(3), trio(), root_vertex());
        let proposal = height_five_proposal();

        pro.on_proposal(&proposal).unwrap();

        assert_eq!(err_effects(&pro), (0, 0, 0, 0));
    }

    #[test]
    fn test_on_proposal_side_effect_bounds() {
        // at most two looped votes, at most one transmission, never a
        // broadcast, whatever the role
        for self_id in [hash(1), hash(2), hash(3)] {
            let mut pro = processor(self_id, trio(), root_vertex());
            pro.on_proposal(&height_five_proposal()).unwrap();
            assert!(pro.looper().votes.len() <= 2);
            assert!(pro.looper().proposals.is_empty());
            assert!(pro.network().transmissions.len() <= 1);
            assert!(pro.network().broadcasts.is_empty());
        }
    }

    #[test]
    fn test_on_proposal_stale_keeps_parent_confirmation() {
        let mut pro = processor(hash(2), trio(), root_vertex());
        let proposal = height_five_proposal();
        pro.graph_mut().insert_known(proposal.candidate.id());

        let err = pro.on_proposal(&proposal).unwrap_err();
        assert!(matches!(err, Error::StaleProposal { .. }));
        assert_eq!(err.attribution(), Attribution::Benign);

        // the parent certificate stands on its own
        assert_eq!(pro.graph().confirmations(hash(10)), 1);
        // no cache entry was made for the stale candidate
        assert!(pro.cache().proposal_by(5, hash(3)).is_none());
    }

    #[test]
    fn test_on_proposal_rejects_wrong_leader() {
        let mut pro = processor(hash(2), trio(), root_vertex());
        // proposed by hash(2), but leader(5) is hash(3)
        let vertex = candidate(5, hash(10), hash(2), hash(20));
        let proposal = proposal_for(vertex, &[hash(1), hash(2)]);

        let err = pro.on_proposal(&proposal).unwrap_err();
        match &err {
            Error::InvalidProposer { leader, .. } => assert_eq!(*leader, hash(3)),
            other => panic!("expected invalid proposer, got {other:?}"),
        }
        assert_eq!(err.attribution(), Attribution::Byzantine);
        assert!(pro.graph().extended().is_empty());
    }

    #[test]
    fn test_on_proposal_conflicting_with_finalized_state() {
        let mut pro = processor(hash(2), trio(), root_vertex());
        let finalized = candidate(5, hash(9), Hash::ZERO, Hash::ZERO);
        pro.graph_mut().finalized = finalized;
        pro.graph_mut().tip = finalized;

        // a proposal at the final height itself is already conflicting
        let proposal = height_five_proposal();
        let err = pro.on_proposal(&proposal).unwrap_err();
        assert!(matches!(err, Error::ConflictingProposal { .. }));
        assert_eq!(err.attribution(), Attribution::Byzantine);
    }

    #[test]
    fn test_on_proposal_obsolete_below_tip() {
        let mut pro = processor(hash(2), trio(), root_vertex());
        pro.graph_mut().tip = candidate(7, hash(9), Hash::ZERO, Hash::ZERO);

        let err = pro.on_proposal(&height_five_proposal()).unwrap_err();
        assert!(matches!(err, Error::ObsoleteProposal { .. }));
        assert_eq!(err.attribution(), Attribution::Benign);
    }

    #[test]
    fn test_on_proposal_at_tip_height_is_acceptable() {
        let mut pro = processor(hash(2), trio(), root_vertex());
        pro.graph_mut().tip = candidate(5, hash(9), Hash::ZERO, Hash::ZERO);

        pro.on_proposal(&height_five_proposal()).unwrap();
    }

    #[test]
    fn test_on_proposal_rejects_bad_signature() {
        let mut pro = processor(hash(2), trio(), root_vertex());
        let mut proposal = height_five_proposal();
        proposal.signature = vec![0u8; 32];

        let err = pro.on_proposal(&proposal).unwrap_err();
        assert!(matches!(err, Error::InvalidSignature(_)));
        assert_eq!(err.attribution(), Attribution::Byzantine);
        // the graph was never extended
        assert!(pro.graph().extended().is_empty());
    }

    #[test]
    fn test_on_proposal_rejects_bad_quorum_before_anything() {
        let mut pro = processor(hash(2), trio(), root_vertex());
        let mut proposal = height_five_proposal();
        proposal.parent_quorum.signature[0] ^= 0xff;

        let err = pro.on_proposal(&proposal).unwrap_err();
        assert!(matches!(err, Error::InvalidSignature(_)));

        // the quorum check precedes every mutation and the proposal check
        assert_eq!(pro.graph().confirmations(hash(10)), 0);
        assert_eq!(pro.verifier().proposal_calls(), 0);
    }

    #[test]
    fn test_on_proposal_surfaces_extend_failure() {
        let mut pro = processor(hash(2), trio(), root_vertex());
        pro.graph_mut().fail_extend = true;

        let err = pro.on_proposal(&height_five_proposal()).unwrap_err();
        assert!(matches!(err, Error::Internal(_)));
        assert_eq!(err.attribution(), Attribution::Fatal);
    }

    #[test]
    fn test_on_proposal_prunes_cache_below_candidate() {
        let mut pro = processor(hash(2), trio(), root_vertex());
        pro.cache_mut()
            .store_vote(signed_vote(4, hash(30), hash(1)))
            .unwrap();
        pro.cache_mut()
            .store_vote(signed_vote(5, hash(31), hash(1)))
            .unwrap();

        pro.on_proposal(&height_five_proposal()).unwrap();

        // strictly below the candidate height is gone, the rest stays
        assert!(pro.cache().vote_by(4, hash(1)).is_none());
        assert!(pro.cache().vote_by(5, hash(1)).is_some());
    }

    #[test]
    fn test_height_zero_proposal_does_not_prune() {
        let mut pro = processor(hash(2), trio(), root_vertex());
        pro.cache_mut()
            .store_vote(signed_vote(0, hash(30), hash(1)))
            .unwrap();

        // conflicts with the root, but only after confirm-parent ran;
        // the height-zero clear must not wrap around and wipe the cache
        let vertex = candidate(0, hash(10), hash(1), hash(20));
        let proposal = proposal_for(vertex, &[hash(1), hash(2)]);
        let err = pro.on_proposal(&proposal).unwrap_err();
        assert!(matches!(err, Error::ConflictingProposal { .. }));
        assert!(pro.cache().vote_by(0, hash(1)).is_some());
    }

    #[test]
    fn test_on_proposal_double_proposal_evidence() {
        let mut pro = processor(hash(2), trio(), root_vertex());
        let first = height_five_proposal();
        let second = proposal_for(candidate(5, hash(10), hash(3), hash(21)), &[hash(1), hash(2)]);

        pro.on_proposal(&first).unwrap();
        let err = pro.on_proposal(&second).unwrap_err();

        match &err {
            Error::DoubleProposal {
                first: evidence_first,
                second: evidence_second,
            } => {
                assert_eq!(evidence_first.candidate.id(), first.candidate.id());
                assert_eq!(evidence_second.candidate.id(), second.candidate.id());
            }
            other => panic!("expected double proposal, got {other:?}"),
        }

        // both parent confirmations counted, only the first cached
        assert_eq!(pro.graph().confirmations(hash(10)), 2);
        assert_eq!(
            pro.cache().proposal_by(5, hash(3)).unwrap().candidate.id(),
            first.candidate.id()
        );
    }

    // collector(5) = hash(1); a valid vote at height 5 for candidate hash(40)
    fn height_five_vote(signer: Hash) -> Vote {
        signed_vote(5, hash(40), signer)
    }

    #[test]
    fn test_on_vote_collects_below_threshold() {
        let mut pro = processor(hash(1), trio(), root_vertex());

        pro.on_vote(&height_five_vote(hash(2))).unwrap();

        assert!(pro.cache().vote_by(5, hash(2)).is_some());
        // one vote of two required: no proposal yet
        assert!(pro.looper().proposals.is_empty());
        assert!(pro.network().broadcasts.is_empty());
    }

    #[test]
    fn test_on_vote_quorum_completes_proposal() {
        let mut pro = processor(hash(1), trio(), root_vertex());

        pro.on_vote(&height_five_vote(hash(2))).unwrap();
        pro.on_vote(&height_five_vote(hash(3))).unwrap();

        // the proposal is looped for priority processing and broadcast
        assert_eq!(pro.looper().proposals.len(), 1);
        assert_eq!(pro.network().broadcasts.len(), 1);
        let proposal = &pro.network().broadcasts[0];
        assert_eq!(proposal, &pro.looper().proposals[0]);
        assert_eq!(proposal.candidate.height, 6);
        assert_eq!(proposal.candidate.parent_id, hash(40));
        assert_eq!(proposal.candidate.proposer_id, hash(1));
        // signers in encounter order
        assert_eq!(proposal.parent_quorum.signer_ids, vec![hash(2), hash(3)]);
    }

    #[test]
    fn test_on_vote_side_effect_bounds() {
        let mut pro = processor(hash(1), trio(), root_vertex());
        pro.on_vote(&height_five_vote(hash(2))).unwrap();
        pro.on_vote(&height_five_vote(hash(3))).unwrap();

        // across both calls: one looped proposal, one broadcast, no votes
        assert_eq!(pro.looper().proposals.len(), 1);
        assert_eq!(pro.network().broadcasts.len(), 1);
        assert!(pro.looper().votes.is_empty());
        assert!(pro.network().transmissions.is_empty());
    }

    #[test]
    fn test_on_vote_stale() {
        let mut pro = processor(hash(1), trio(), root_vertex());
        pro.graph_mut().insert_known(hash(40));

        let err = pro.on_vote(&height_five_vote(hash(2))).unwrap_err();
        assert!(matches!(err, Error::StaleVote { .. }));
        assert_eq!(err.attribution(), Attribution::Benign);
        assert!(pro.cache().vote_by(5, hash(2)).is_none());
    }

    #[test]
    fn test_on_vote_conflicting_below_final() {
        let mut pro = processor(hash(1), trio(), root_vertex());
        let finalized = candidate(6, hash(9), Hash::ZERO, Hash::ZERO);
        pro.graph_mut().finalized = finalized;
        pro.graph_mut().tip = finalized;

        let err = pro.on_vote(&height_five_vote(hash(2))).unwrap_err();
        assert!(matches!(err, Error::ConflictingVote { .. }));
        assert_eq!(err.attribution(), Attribution::Byzantine);
    }

    #[test]
    fn test_on_vote_at_final_height_is_collectable() {
        // a vote at the final height certifies the final vertex as parent
        // of the next proposal; rejecting it would wedge the protocol at
        // genesis
        let mut pro = processor(hash(1), trio(), root_vertex());
        let finalized = candidate(5, hash(9), Hash::ZERO, Hash::ZERO);
        pro.graph_mut().finalized = finalized;
        pro.graph_mut().tip = finalized;

        pro.on_vote(&height_five_vote(hash(2))).unwrap();
        assert!(pro.cache().vote_by(5, hash(2)).is_some());
    }

    #[test]
    fn test_on_vote_obsolete_skips_signature_check() {
        let mut pro = processor(hash(1), trio(), root_vertex());
        pro.graph_mut().tip = candidate(10, hash(9), Hash::ZERO, Hash::ZERO);

        // vote at height 8 with the tip at 10: rejected before any
        // signature verification
        let vote = signed_vote(8, hash(40), hash(2));
        let err = pro.on_vote(&vote).unwrap_err();
        assert!(matches!(err, Error::ObsoleteVote { .. }));
        assert_eq!(pro.verifier().vote_calls(), 0);
    }

    #[test]
    fn test_on_vote_rejects_wrong_collector() {
        // hash(2) is not the collector of height 5
        let mut pro = processor(hash(2), trio(), root_vertex());

        let err = pro.on_vote(&height_five_vote(hash(3))).unwrap_err();
        match &err {
            Error::InvalidCollector {
                receiver,
                collector,
                ..
            } => {
                assert_eq!(*receiver, hash(2));
                assert_eq!(*collector, hash(1));
            }
            other => panic!("expected invalid collector, got {other:?}"),
        }
        assert_eq!(err.attribution(), Attribution::Byzantine);
    }

    #[test]
    fn test_on_vote_rejects_bad_signature() {
        let mut pro = processor(hash(1), trio(), root_vertex());
        let mut vote = height_five_vote(hash(2));
        vote.signature = vec![0u8; 32];

        let err = pro.on_vote(&vote).unwrap_err();
        assert!(matches!(err, Error::InvalidSignature(_)));
        assert!(pro.cache().vote_by(5, hash(2)).is_none());
    }

    #[test]
    fn test_on_vote_double_vote_evidence() {
        let mut pro = processor(hash(1), trio(), root_vertex());
        let first = signed_vote(5, hash(40), hash(2));
        let second = signed_vote(5, hash(41), hash(2));

        pro.on_vote(&first).unwrap();
        let err = pro.on_vote(&second).unwrap_err();

        match &err {
            Error::DoubleVote {
                first: evidence_first,
                second: evidence_second,
            } => {
                assert_eq!(evidence_first, &first);
                assert_eq!(evidence_second, &second);
            }
            other => panic!("expected double vote, got {other:?}"),
        }

        // the cache still holds only the first vote
        assert_eq!(pro.cache().vote_by(5, hash(2)).unwrap(), &first);
    }

    #[test]
    fn test_on_vote_surfaces_builder_failure() {
        let mut pro = processor(hash(1), trio(), root_vertex());
        pro.on_vote(&height_five_vote(hash(2))).unwrap();

        // the quorum completes, but no payload can be built
        pro.builder_mut().fail = true;
        let err = pro.on_vote(&height_five_vote(hash(3))).unwrap_err();
        assert!(matches!(err, Error::Internal(_)));
        assert!(pro.network().broadcasts.is_empty());
    }
}

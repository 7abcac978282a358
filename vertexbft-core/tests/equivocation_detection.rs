// Copyright (c) Aptos Foundation
// SPDX-License-Identifier: Apache-2.0

//! Double-vote and double-proposal detection with full evidence.

use vertexbft_core::cache::Volatile;
use vertexbft_core::graph::Chain;
use vertexbft_core::processor::Processor;
use vertexbft_core::strategy::RoundRobin;
use vertexbft_core::testing::fixtures::{hash, proposal_for, root_vertex, signed_vote};
use vertexbft_core::testing::{
    MockSigner, MockVerifier, RecordingLooper, RecordingNetwork, SequenceBuilder,
};
use vertexbft_traits::{Attribution, Cache, Error, Graph, Hash, Proposal, Vertex};

type TestProcessor = Processor<
    RecordingNetwork,
    Chain,
    SequenceBuilder,
    RoundRobin,
    MockSigner,
    MockVerifier,
    Volatile,
    RecordingLooper,
>;

fn processor(self_id: Hash, participants: Vec<Hash>) -> TestProcessor {
    Processor::new(
        RecordingNetwork::new(),
        Chain::new(root_vertex()),
        SequenceBuilder::new(),
        RoundRobin::new(participants),
        MockSigner::new(self_id),
        MockVerifier::new(),
        Volatile::new(),
        RecordingLooper::new(),
    )
}

/// A signer sending two different votes for the same height is reported
/// with both votes as evidence, and only the first one sticks.
#[test]
fn test_double_vote_detection() {
    // collector(5) = leader(6) = participants[0] = hash(1)
    let mut pro = processor(hash(1), vec![hash(1), hash(2)]);

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
    assert_eq!(err.attribution(), Attribution::Byzantine);

    // the cache still holds only the first vote
    assert_eq!(pro.cache().vote_by(5, hash(2)).unwrap(), &first);
    // the equivocating vote never formed a quorum
    assert!(pro.network().broadcasts.is_empty());
}

/// Re-sending the same vote is not equivocation.
#[test]
fn test_repeated_vote_is_not_double() {
    let mut pro = processor(hash(1), vec![hash(1), hash(2)]);

    let vote = signed_vote(5, hash(40), hash(2));
    pro.on_vote(&vote).unwrap();
    pro.on_vote(&vote).unwrap();

    let quorum = pro.cache().quorum(5, hash(40)).unwrap();
    assert_eq!(quorum.len(), 1);
}

fn height_one_proposal(parent: &Vertex, proposer: Hash, arc: Hash, signers: &[Hash]) -> Proposal {
    let candidate = Vertex {
        height: 1,
        parent_id: parent.id(),
        proposer_id: proposer,
        arc_id: arc,
    };
    proposal_for(candidate, signers)
}

/// A leader proposing two different candidates at the same height fails at
/// the cache with both proposals as evidence, but only after the parent
/// confirmations have been counted: the parent's quorum stands on its own.
#[test]
fn test_equivocating_proposer() {
    // leader(1) = participants[1] = hash(2); we are a plain voter
    let participants = vec![hash(1), hash(2), hash(3)];
    let mut pro = processor(hash(1), participants.clone());
    let root = root_vertex();

    let quorum_signers = [hash(1), hash(3)];
    let first = height_one_proposal(&root, hash(2), hash(50), &quorum_signers);
    let second = height_one_proposal(&root, hash(2), hash(51), &quorum_signers);
    assert_ne!(first.candidate.id(), second.candidate.id());

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
    assert_eq!(err.attribution(), Attribution::Byzantine);

    // both parent confirmations counted
    assert_eq!(pro.graph().confirmations(root.id()), 2);
    // only the first proposal in the cache
    let cached = pro.cache().proposal_by(1, hash(2)).unwrap();
    assert_eq!(cached.candidate.id(), first.candidate.id());
    // both siblings were applied to the graph before the cache refused
    assert!(pro.graph().contains(first.candidate.id()));
    assert!(pro.graph().contains(second.candidate.id()));
}

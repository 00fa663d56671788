//! Property tests over two-party conversations.
//!
//! proptest generates a script of steps; both parties replay it against their own session and
//! every received payload must equal the one that was sent. Any deviation on the wire must be
//! rejected.

use proptest::prelude::*;

use strobe_framework::strobe::{
    protocol::{tags, IStream},
    DuplexOps,
    Error,
    Flags,
    KeccakF1600,
    Result,
    Strobe,
};

type Session = Strobe<KeccakF1600>;

const PROTOCOL: &str = "property test";

#[derive(Clone, Debug)]
enum Step {
    Clear { from_client: bool, payload: Vec<u8> },
    Encrypted { from_client: bool, payload: Vec<u8> },
    Mac { from_client: bool },
    Siv { from_client: bool, payload: Vec<u8> },
    Key(Vec<u8>),
    Ratchet,
}

fn payload_strategy() -> impl Strategy<Value = Vec<u8>> {
    prop::collection::vec(any::<u8>(), 0..300)
}

fn step_strategy() -> impl Strategy<Value = Step> {
    prop_oneof![
        3 => (any::<bool>(), payload_strategy())
            .prop_map(|(from_client, payload)| Step::Clear { from_client, payload }),
        5 => (any::<bool>(), payload_strategy())
            .prop_map(|(from_client, payload)| Step::Encrypted { from_client, payload }),
        3 => any::<bool>().prop_map(|from_client| Step::Mac { from_client }),
        2 => (any::<bool>(), payload_strategy())
            .prop_map(|(from_client, payload)| Step::Siv { from_client, payload }),
        1 => prop::collection::vec(any::<u8>(), 1..64).prop_map(Step::Key),
        1 => Just(Step::Ratchet),
    ]
}

/// Both ends of one conversation.
struct Conversation {
    client: Session,
    server: Session,
}

impl Conversation {
    fn new() -> Self {
        Self {
            client: Session::new(PROTOCOL).unwrap(),
            server: Session::new(PROTOCOL).unwrap(),
        }
    }

    fn parties(&mut self, from_client: bool) -> (&mut Session, &mut Session) {
        if from_client {
            (&mut self.client, &mut self.server)
        } else {
            (&mut self.server, &mut self.client)
        }
    }

    /// Run one step on both sides, returning what was sent and what was received.
    fn apply(&mut self, step: &Step) -> Result<(Vec<u8>, Vec<u8>)> {
        match step {
            Step::Clear { from_client, payload } => {
                let (sender, receiver) = self.parties(*from_client);
                let wire = sender.send(&tags::APP_PLAINTEXT, payload, None)?;
                let received = receiver.recv(&[tags::APP_PLAINTEXT], &wire, None)?;
                Ok((payload.clone(), received))
            }
            Step::Encrypted { from_client, payload } => {
                let (sender, receiver) = self.parties(*from_client);
                let wire = sender.send(&tags::APP_CIPHERTEXT, payload, None)?;
                let received = receiver.recv(&[tags::APP_CIPHERTEXT], &wire, None)?;
                Ok((payload.clone(), received))
            }
            Step::Mac { from_client } => {
                let (sender, receiver) = self.parties(*from_client);
                let wire = sender.send(&tags::MAC, &[], None)?;
                receiver.recv(&[tags::MAC], &wire, None)?;
                Ok((Vec::new(), Vec::new()))
            }
            Step::Siv { from_client, payload } => {
                let (sender, receiver) = self.parties(*from_client);
                let wire = sender.send_siv(payload)?;
                let received = receiver.recv_siv(&wire)?;
                Ok((payload.clone(), received))
            }
            Step::Key(secret) => {
                self.client.inject(&tags::KEM_RESULT, secret, None)?;
                self.server.inject(&tags::KEM_RESULT, secret, None)?;
                Ok((Vec::new(), Vec::new()))
            }
            Step::Ratchet => {
                self.client.inject(&tags::RATCHET, &[], None)?;
                self.server.inject(&tags::RATCHET, &[], None)?;
                Ok((Vec::new(), Vec::new()))
            }
        }
    }
}

/// Receive an encrypted message followed by its MAC, requiring the whole input to be consumed.
fn open_sealed(receiver: &mut Session, wire: &[u8]) -> Result<Vec<u8>> {
    let mut input = wire;
    let (_, msg) = receiver.inbound_from(&[tags::APP_CIPHERTEXT], &mut input, None)?;
    receiver.inbound_from(&[tags::MAC], &mut input, None)?;
    if input.remaining() != 0 {
        return Err(Error::TrailingInput(input.remaining()));
    }
    Ok(msg)
}

proptest! {
    /// Every payload arrives intact and both sessions end with the same transcript.
    #[test]
    fn prop_conversations_stay_in_sync(steps in prop::collection::vec(step_strategy(), 0..24)) {
        let mut conversation = Conversation::new();

        for (i, step) in steps.iter().enumerate() {
            let outcome = conversation.apply(step);
            prop_assert!(outcome.is_ok(), "step {} ({:?}) failed: {:?}", i, step, outcome);
            if let Ok((sent, received)) = outcome {
                prop_assert_eq!(sent, received, "step {} delivered the wrong payload", i);
            }
        }

        let client_hash = conversation.client.extract(&tags::HASH, Some(32)).unwrap();
        let server_hash = conversation.server.extract(&tags::HASH, Some(32)).unwrap();
        prop_assert_eq!(client_hash, server_hash);
    }

    /// Flipping any bit of a sealed message makes the receiver fail.
    #[test]
    fn prop_any_bit_flip_is_rejected(
        key in prop::collection::vec(any::<u8>(), 1..32),
        msg in payload_strategy(),
        bit in any::<prop::sample::Index>(),
    ) {
        let mut sender = Session::new(PROTOCOL).unwrap();
        let mut receiver = Session::new(PROTOCOL).unwrap();
        sender.key(&key).unwrap();
        receiver.key(&key).unwrap();

        let mut wire = sender.send(&tags::APP_CIPHERTEXT, &msg, None).unwrap();
        wire.extend(sender.send(&tags::MAC, &[], None).unwrap());

        let mut intact = receiver.clone();
        prop_assert_eq!(open_sealed(&mut intact, &wire).unwrap(), msg);

        let bit = bit.index(wire.len() * 8);
        wire[bit / 8] ^= 1 << (bit % 8);
        prop_assert!(open_sealed(&mut receiver, &wire).is_err());
    }

    /// Flipping any bit of an SIV envelope is an authentication failure.
    #[test]
    fn prop_siv_rejects_bit_flips(
        msg in payload_strategy(),
        bit in any::<prop::sample::Index>(),
    ) {
        let mut sender = Session::new(PROTOCOL).unwrap();
        let mut receiver = Session::new(PROTOCOL).unwrap();
        sender.key(b"siv property key").unwrap();
        receiver.key(b"siv property key").unwrap();

        let mut wire = sender.send_siv(&msg).unwrap();
        let bit = bit.index(wire.len() * 8);
        wire[bit / 8] ^= 1 << (bit % 8);
        prop_assert_eq!(receiver.recv_siv(&wire).unwrap_err(), Error::AuthenticationFailed);
    }

    /// The same message on the same transcript always gives the same SIV envelope.
    #[test]
    fn prop_siv_is_deterministic(msg in payload_strategy(), other in payload_strategy()) {
        let mut session = Session::new(PROTOCOL).unwrap();
        session.key(b"siv property key").unwrap();

        let first = session.fork().send_siv(&msg).unwrap();
        let second = session.fork().send_siv(&msg).unwrap();
        prop_assert_eq!(&first, &second);
        prop_assert_eq!(first.len(), msg.len() + 20);

        if other != msg {
            prop_assert_ne!(first, session.fork().send_siv(&other).unwrap());
        }
    }

    /// Feeding an operation in chunks is the same as running it in one call.
    #[test]
    fn prop_streaming_matches_one_shot(
        msg in payload_strategy(),
        chunk in 1..64usize,
    ) {
        let mut whole = Session::new(PROTOCOL).unwrap();
        let mut chunked = whole.fork();
        whole.key(b"stream key").unwrap();
        chunked.key(b"stream key").unwrap();

        let expected = whole.send_enc(&msg).unwrap();

        let mut stream = chunked.begin(Flags::SEND_ENC, Some(msg.len())).unwrap();
        let mut out = Vec::new();
        for piece in msg.chunks(chunk) {
            out.extend(stream.feed(piece).unwrap());
        }
        stream.finish().unwrap();

        prop_assert_eq!(out, expected);
        prop_assert_eq!(whole.prf(16).unwrap(), chunked.prf(16).unwrap());
    }
}

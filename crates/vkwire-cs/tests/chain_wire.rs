use pretty_assertions::assert_eq;
use proptest::prelude::*;
use vkwire_cs::{
    extension_chain, impl_extensible, Chain, CsOptions, DecodeFault, Decoder, EmptyObjectTable,
    Encoder, Link, NoExtensions, StructureType, TempArena, WireCodec,
};

const PAYLOAD: StructureType = StructureType(1000);
const TOGGLE: StructureType = StructureType(1001);
const LABEL: StructureType = StructureType(1002);

#[derive(Debug, Clone, Default, PartialEq)]
struct Toggle {
    next: Chain<NoExtensions>,
    enabled: bool,
}

impl WireCodec for Toggle {
    fn encode_self(&self, enc: &mut Encoder) {
        enc.encode_bool(self.enabled);
    }

    fn decode_self_temp(&mut self, dec: &mut Decoder<'_>) {
        self.enabled = dec.decode_bool();
    }
}

impl_extensible!(Toggle, TOGGLE, NoExtensions, next);

#[derive(Debug, Clone, Default, PartialEq)]
struct Label {
    next: Chain<NoExtensions>,
    tag: u32,
}

impl WireCodec for Label {
    fn encode_self(&self, enc: &mut Encoder) {
        enc.encode_scalar(self.tag);
    }

    fn decode_self_temp(&mut self, dec: &mut Decoder<'_>) {
        self.tag = dec.decode_scalar();
    }

    fn decode_self_partial(&mut self, dec: &mut Decoder<'_>) {
        dec.skip::<u32>();
    }
}

impl_extensible!(Label, LABEL, NoExtensions, next);

extension_chain! {
    enum PayloadExt for "Payload" {
        Toggle(Toggle),
        Label(Label),
    }
}

#[derive(Debug, Clone, Default, PartialEq)]
struct Payload {
    next: Chain<PayloadExt>,
    count: u32,
    values: Option<Vec<u32>>,
}

impl WireCodec for Payload {
    fn encode_self(&self, enc: &mut Encoder) {
        enc.encode_scalar(self.count);
        enc.encode_scalar_array(self.values.as_deref());
    }

    fn decode_self_temp(&mut self, dec: &mut Decoder<'_>) {
        self.count = dec.decode_scalar();
        self.values = dec.decode_scalar_array(self.count as usize);
    }
}

impl_extensible!(Payload, PAYLOAD, PayloadExt, next);

fn encode(payload: &Payload) -> Vec<u8> {
    let mut enc = Encoder::new();
    enc.encode_extensible(payload);
    enc.finish().unwrap()
}

fn decode(bytes: &[u8]) -> (Payload, usize, Option<DecodeFault>) {
    decode_with(bytes, &CsOptions::default())
}

fn decode_with(bytes: &[u8], options: &CsOptions) -> (Payload, usize, Option<DecodeFault>) {
    let mut arena = options.temp_arena();
    let mut dec = Decoder::with_options(bytes, &mut arena, &EmptyObjectTable, options);
    let payload = dec.decode_extensible_temp::<Payload>();
    (payload, dec.position(), dec.fault())
}

fn sample() -> Payload {
    let mut next = Chain::new();
    next.push(Toggle {
        enabled: true,
        ..Default::default()
    });
    Payload {
        next,
        count: 3,
        values: Some(vec![10, 20, 30]),
    }
}

fn le(words: &[&[u8]]) -> Vec<u8> {
    words.concat()
}

#[test]
fn payload_with_one_extension_decodes_back() {
    let bytes = encode(&sample());
    assert_eq!(bytes.len(), 48);

    let (decoded, consumed, fault) = decode(&bytes);
    assert_eq!(fault, None);
    assert_eq!(consumed, bytes.len());
    assert_eq!(decoded.count, 3);
    assert_eq!(decoded, sample());
}

#[test]
fn chain_follows_the_base_fields_on_the_wire() {
    let bytes = le(&[
        &PAYLOAD.0.to_le_bytes(),
        &1u32.to_le_bytes(),
        &1u32.to_le_bytes(),
        &1u64.to_le_bytes(),
        &5u32.to_le_bytes(),
        &1u32.to_le_bytes(),
        &LABEL.0.to_le_bytes(),
        &7u32.to_le_bytes(),
        &1u32.to_le_bytes(),
        &TOGGLE.0.to_le_bytes(),
        &1u32.to_le_bytes(),
        &0u32.to_le_bytes(),
    ]);

    let (decoded, consumed, fault) = decode(&bytes);
    assert_eq!(fault, None);
    assert_eq!(consumed, bytes.len());
    assert_eq!(decoded.count, 1);
    assert_eq!(decoded.values, Some(vec![5]));
    assert_eq!(
        decoded.next.links(),
        &[
            Link::Known(PayloadExt::Label(Label {
                tag: 7,
                ..Default::default()
            })),
            Link::Known(PayloadExt::Toggle(Toggle {
                enabled: true,
                ..Default::default()
            })),
        ]
    );
    assert_eq!(encode(&decoded), bytes);
}

#[test]
fn chain_ahead_of_the_base_fields_is_rejected() {
    // Tag, then the link with its own nested terminator, then the base fields.
    let bytes = le(&[
        &PAYLOAD.0.to_le_bytes(),
        &1u32.to_le_bytes(),
        &TOGGLE.0.to_le_bytes(),
        &0u32.to_le_bytes(),
        &1u32.to_le_bytes(),
        &0u32.to_le_bytes(),
        &0u32.to_le_bytes(),
    ]);

    let (decoded, _, fault) = decode(&bytes);
    assert_eq!(
        fault,
        Some(DecodeFault::InvalidMarker {
            offset: 8,
            found: TOGGLE.0,
        })
    );
    assert!(decoded.next.is_empty());
}

#[test]
fn standalone_chain_decodes_in_link_order() {
    let mut chain: Chain<PayloadExt> = Chain::new();
    chain.push(Label {
        tag: 3,
        ..Default::default()
    });
    chain.push(Toggle {
        enabled: true,
        ..Default::default()
    });
    let mut enc = Encoder::new();
    enc.encode_pnext(&chain);
    enc.encode_pnext(&chain);
    let bytes = enc.finish().unwrap();

    let mut arena = TempArena::default();
    let mut dec = Decoder::new(&bytes, &mut arena, &EmptyObjectTable);
    let full = dec.decode_pnext_temp::<PayloadExt>();
    let partial = dec.decode_pnext_partial::<PayloadExt>();
    assert_eq!(dec.fault(), None);
    assert_eq!(dec.remaining(), 0);
    assert_eq!(full, chain);

    let shapes: Vec<StructureType> = partial.links().iter().map(Link::structure_type).collect();
    assert_eq!(shapes, vec![LABEL, TOGGLE]);
    assert!(matches!(
        partial.links()[0],
        Link::Known(PayloadExt::Label(Label { tag: 0, .. }))
    ));
}

#[test]
fn corrupting_the_chain_terminator_is_fatal() {
    let mut bytes = encode(&sample());
    let last = bytes.len() - 1;
    bytes[last] = 0xff;

    let (_, _, fault) = decode(&bytes);
    assert_eq!(
        fault,
        Some(DecodeFault::InvalidMarker {
            offset: 44,
            found: 0xff00_0000,
        })
    );
}

#[test]
fn encoding_stops_at_the_first_foreign_link() {
    let mut with_foreign = Payload::default();
    with_foreign.next.push(Label {
        tag: 7,
        ..Default::default()
    });
    with_foreign.next.push_foreign(StructureType(9999));
    with_foreign.next.push(Toggle::default());

    let mut known_prefix = Payload::default();
    known_prefix.next.push(Label {
        tag: 7,
        ..Default::default()
    });

    assert_eq!(encode(&with_foreign), encode(&known_prefix));
}

#[test]
fn decoding_an_unknown_tag_is_fatal() {
    let mut enc = Encoder::new();
    enc.encode_scalar(PAYLOAD);
    enc.encode_scalar(0u32);
    enc.encode_scalar_array::<u32>(None);
    enc.encode_simple_pointer(true);
    enc.encode_scalar(StructureType(9999));
    enc.encode_scalar(0u32);
    enc.encode_simple_pointer(false);
    let bytes = enc.finish().unwrap();

    let (decoded, _, fault) = decode(&bytes);
    assert_eq!(
        fault,
        Some(DecodeFault::UnknownExtension {
            base: "Payload",
            found: StructureType(9999),
        })
    );
    assert!(decoded.next.is_empty());
}

#[test]
fn wrong_base_structure_type_is_fatal() {
    let mut bytes = encode(&Payload::default());
    bytes[..4].copy_from_slice(&LABEL.0.to_le_bytes());

    let (_, _, fault) = decode(&bytes);
    assert_eq!(
        fault,
        Some(DecodeFault::UnexpectedStructureType {
            expected: PAYLOAD,
            found: LABEL,
        })
    );
}

#[test]
fn chain_length_is_bounded() {
    let payload = Payload {
        next: (0..3)
            .map(|tag| {
                PayloadExt::Label(Label {
                    tag,
                    ..Default::default()
                })
            })
            .collect(),
        ..Default::default()
    };
    let bytes = encode(&payload);

    let options = CsOptions {
        max_chain_links: 2,
        ..CsOptions::default()
    };
    let (_, _, fault) = decode_with(&bytes, &options);
    assert_eq!(
        fault,
        Some(DecodeFault::ChainTooLong {
            base: "Payload",
            max: 2,
        })
    );

    let (decoded, _, fault) = decode(&bytes);
    assert_eq!(fault, None);
    assert_eq!(decoded.next.len(), 3);
}

#[test]
fn partial_decode_consumes_the_same_bytes() {
    let mut payload = sample();
    payload.next.push(Label {
        tag: 99,
        ..Default::default()
    });
    let bytes = encode(&payload);

    let mut arena = TempArena::default();
    let mut dec = Decoder::new(&bytes, &mut arena, &EmptyObjectTable);
    let partial = dec.decode_extensible_partial::<Payload>();
    assert_eq!(dec.fault(), None);
    assert_eq!(dec.position(), bytes.len());

    let labels: Vec<_> = partial
        .next
        .links()
        .iter()
        .filter_map(|link| match link {
            Link::Known(PayloadExt::Label(label)) => Some(label.tag),
            _ => None,
        })
        .collect();
    assert_eq!(labels, vec![0]);
}

#[test]
fn faults_are_logged_once() {
    let _ = tracing_subscriber::fmt()
        .with_max_level(tracing::Level::DEBUG)
        .with_test_writer()
        .try_init();

    let bytes = encode(&sample());
    let (_, _, fault) = decode(&bytes[..bytes.len() - 2]);
    assert!(matches!(fault, Some(DecodeFault::Truncated { .. })));
}

proptest! {
    #![proptest_config(ProptestConfig {
        cases: 256,
        rng_algorithm: proptest::test_runner::RngAlgorithm::ChaCha,
        rng_seed: proptest::test_runner::RngSeed::Fixed(0x5eed_c0de),
        .. ProptestConfig::default()
    })]

    #[test]
    fn every_truncation_is_fatal(cut in 0usize..48) {
        let bytes = encode(&sample());
        let (_, consumed, fault) = decode(&bytes[..cut]);
        prop_assert!(fault.is_some());
        prop_assert!(consumed <= cut);
    }

    #[test]
    fn arbitrary_bytes_never_overrun(bytes in proptest::collection::vec(any::<u8>(), 0..128)) {
        let (decoded, consumed, fault) = decode(&bytes);
        prop_assert!(consumed <= bytes.len());
        if fault.is_none() {
            prop_assert_eq!(encode(&decoded), bytes[..consumed].to_vec());
        }
    }

    #[test]
    fn payloads_decode_back(
        values in proptest::option::of(proptest::collection::vec(any::<u32>(), 0..16)),
        tags in proptest::collection::vec(any::<u32>(), 0..4),
        enabled in any::<bool>(),
    ) {
        let count = values.as_ref().map_or(0, Vec::len) as u32;
        let mut payload = Payload { count, values, ..Default::default() };
        for tag in tags {
            payload.next.push(Label { tag, ..Default::default() });
        }
        payload.next.push(Toggle { enabled, ..Default::default() });

        let bytes = encode(&payload);
        let (decoded, consumed, fault) = decode(&bytes);
        prop_assert_eq!(fault, None);
        prop_assert_eq!(consumed, bytes.len());
        prop_assert_eq!(decoded, payload);
    }
}

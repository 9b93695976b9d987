#![allow(dead_code)]

use std::{
    collections::HashMap,
    sync::{
        atomic::{AtomicUsize, Ordering},
        Mutex,
    },
    thread,
    time::Duration,
};

use anchor_lang::AccountSerialize;
use candy_cli::{common::*, config::data::Creator, validate::format::Metadata};
use mpl_candy_machine::{CandyMachineData, CollectionPDA};

pub const RENT_PER_BYTE: u64 = 6960;

/// In-memory [`CandyProgram`] recording every transaction sent.
pub struct MockProgram {
    payer: Pubkey,
    balance: u64,
    accounts: Mutex<HashMap<Pubkey, Vec<u8>>>,
    sent: Mutex<Vec<Vec<Instruction>>>,
    remote_calls: AtomicUsize,
    send_calls: AtomicUsize,
    /// 1-based index of the send call that fails.
    fail_on_send: Option<usize>,
    send_delay: Duration,
    in_flight: AtomicUsize,
    max_in_flight: AtomicUsize,
}

impl MockProgram {
    pub fn new() -> Self {
        MockProgram {
            payer: Pubkey::new_unique(),
            balance: 100_000_000_000,
            accounts: Mutex::new(HashMap::new()),
            sent: Mutex::new(Vec::new()),
            remote_calls: AtomicUsize::new(0),
            send_calls: AtomicUsize::new(0),
            fail_on_send: None,
            send_delay: Duration::ZERO,
            in_flight: AtomicUsize::new(0),
            max_in_flight: AtomicUsize::new(0),
        }
    }

    pub fn with_balance(mut self, balance: u64) -> Self {
        self.balance = balance;
        self
    }

    pub fn failing_on_send(mut self, call: usize) -> Self {
        self.fail_on_send = Some(call);
        self
    }

    pub fn with_send_delay(mut self, delay: Duration) -> Self {
        self.send_delay = delay;
        self
    }

    pub fn set_account(&self, address: Pubkey, data: Vec<u8>) {
        self.accounts.lock().unwrap().insert(address, data);
    }

    /// Calls that would reach the cluster.
    pub fn remote_calls(&self) -> usize {
        self.remote_calls.load(Ordering::SeqCst)
    }

    pub fn sent(&self) -> Vec<Vec<Instruction>> {
        self.sent.lock().unwrap().clone()
    }

    pub fn max_in_flight(&self) -> usize {
        self.max_in_flight.load(Ordering::SeqCst)
    }
}

impl CandyProgram for MockProgram {
    fn payer(&self) -> Pubkey {
        self.payer
    }

    fn get_account_data(&self, address: &Pubkey) -> Result<Option<Vec<u8>>> {
        self.remote_calls.fetch_add(1, Ordering::SeqCst);
        Ok(self.accounts.lock().unwrap().get(address).cloned())
    }

    fn get_balance(&self, _address: &Pubkey) -> Result<u64> {
        self.remote_calls.fetch_add(1, Ordering::SeqCst);
        Ok(self.balance)
    }

    fn get_minimum_balance_for_rent_exemption(&self, size: usize) -> Result<u64> {
        self.remote_calls.fetch_add(1, Ordering::SeqCst);
        Ok(size as u64 * RENT_PER_BYTE)
    }

    fn send_instructions(
        &self,
        instructions: Vec<Instruction>,
        _signers: &[&Keypair],
    ) -> Result<Signature> {
        self.remote_calls.fetch_add(1, Ordering::SeqCst);
        let call = self.send_calls.fetch_add(1, Ordering::SeqCst) + 1;

        let current = self.in_flight.fetch_add(1, Ordering::SeqCst) + 1;
        self.max_in_flight.fetch_max(current, Ordering::SeqCst);
        if !self.send_delay.is_zero() {
            thread::sleep(self.send_delay);
        }
        self.in_flight.fetch_sub(1, Ordering::SeqCst);

        if self.fail_on_send == Some(call) {
            return Err(anyhow!("Transaction simulation failed: send {}", call));
        }

        self.sent.lock().unwrap().push(instructions);
        Ok(Signature::new_unique())
    }
}

/// Candy machine account data as stored on chain.
pub fn candy_machine_account(candy_machine: &CandyMachine) -> Vec<u8> {
    let mut data = Vec::new();
    candy_machine.try_serialize(&mut data).unwrap();
    data
}

pub fn collection_pda_account(mint: Pubkey, candy_machine: Pubkey) -> Vec<u8> {
    let mut data = Vec::new();
    CollectionPDA {
        mint,
        candy_machine,
    }
    .try_serialize(&mut data)
    .unwrap();
    data
}

pub fn candy_machine(items_available: u64, items_redeemed: u64) -> CandyMachine {
    CandyMachine {
        authority: Pubkey::new_unique(),
        wallet: Pubkey::new_unique(),
        token_mint: None,
        items_redeemed,
        data: CandyMachineData {
            uuid: "ABCDEF".to_string(),
            price: 1_000_000_000,
            symbol: "NB".to_string(),
            items_available,
            retain_authority: true,
            ..Default::default()
        },
    }
}

pub fn creators() -> Vec<Creator> {
    vec![
        Creator {
            address: Some(Pubkey::new_unique().to_string()),
            share: 60,
        },
        Creator {
            address: Some(Pubkey::new_unique().to_string()),
            share: 40,
        },
    ]
}

/// Writes `count` image and metadata pairs to `dir`.
pub fn write_assets(dir: &Path, count: usize) {
    for index in 0..count {
        std::fs::write(dir.join(format!("{}.png", index)), [0u8; 4]).unwrap();

        let metadata = Metadata {
            name: format!("Number #{:04}", index),
            symbol: "NB".to_string(),
            description: "Collection of numbers".to_string(),
            seller_fee_basis_points: 500,
            image: format!("{}.png", index),
            properties: candy_cli::validate::format::Property {
                creators: creators(),
                ..Default::default()
            },
            ..Default::default()
        };
        std::fs::write(
            dir.join(format!("{}.json", index)),
            serde_json::to_string(&metadata).unwrap(),
        )
        .unwrap();
    }
}

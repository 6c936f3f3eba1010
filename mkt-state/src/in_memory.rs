//! A height-indexed chain of blocks, held in memory.

use mkt_chain::{
    block::{BlockRef, Height},
    chain_history::ChainHistory,
    parameters::NetworkParameters,
    work::difficulty::{block_work, ChainWork, CompactDifficulty},
};

use crate::{
    check::{self, difficulty},
    ValidateContextError,
};


/// A single chain of blocks, starting at the genesis block.
///
/// Blocks can only be appended at the tip, so the block at each height never
/// changes. This makes every ancestor lookup consistent, even across
/// multiple difficulty calculations.
#[derive(Clone, Debug, Default, Eq, PartialEq)]
pub struct InMemoryChain {
    /// The blocks in this chain, indexed by height.
    blocks: Vec<BlockRef>,

    /// The cumulative work of the chain up to and including each block,
    /// indexed by height.
    chain_work: Vec<ChainWork>,
}

impl InMemoryChain {
    /// Returns a new empty chain.
    pub fn new() -> InMemoryChain {
        InMemoryChain::default()
    }

    /// Returns the tip block, or `None` if the chain is empty.
    pub fn tip(&self) -> Option<&BlockRef> {
        self.blocks.last()
    }

    /// Returns the block at `height`, if it is in this chain.
    pub fn block(&self, height: Height) -> Option<&BlockRef> {
        self.blocks.get(usize::try_from(height.0).ok()?)
    }

    /// Returns the number of blocks in this chain.
    pub fn len(&self) -> usize {
        self.blocks.len()
    }

    /// Returns true if this chain has no blocks.
    pub fn is_empty(&self) -> bool {
        self.blocks.is_empty()
    }

    /// Returns the total work of this chain, or zero if the chain is empty.
    pub fn chain_work(&self) -> ChainWork {
        self.chain_work.last().copied().unwrap_or_default()
    }

    /// Returns the total work of this chain, up to and including the block
    /// at `height`.
    pub fn chain_work_at(&self, height: Height) -> Option<ChainWork> {
        self.chain_work.get(usize::try_from(height.0).ok()?).copied()
    }

    /// Returns the difficulty threshold required for the next block.
    pub fn next_required_bits(
        &self,
        parameters: &NetworkParameters,
    ) -> Result<CompactDifficulty, ValidateContextError> {
        difficulty::next_required_bits(self.tip(), parameters, self)
    }

    /// Appends `block` to the tip of this chain, without checking its
    /// difficulty threshold.
    ///
    /// Used for blocks that were already checked, and for test histories.
    pub fn commit(&mut self, block: BlockRef) -> Result<(), ValidateContextError> {
        check::height_one_more_than_parent_height(
            self.tip().map(|tip| tip.height),
            block.height,
        )?;

        let chain_work = self.chain_work() + block_work(block.difficulty_threshold);

        self.blocks.push(block);
        self.chain_work.push(chain_work);

        tracing::trace!(height = ?block.height, ?chain_work, "committed block");

        Ok(())
    }

    /// Checks that `block` has the required difficulty threshold for the
    /// next block, then appends it to the tip of this chain.
    pub fn commit_checked(
        &mut self,
        block: BlockRef,
        parameters: &NetworkParameters,
    ) -> Result<(), ValidateContextError> {
        check::height_one_more_than_parent_height(
            self.tip().map(|tip| tip.height),
            block.height,
        )?;
        check::difficulty_threshold_is_valid(
            block.difficulty_threshold,
            self.tip(),
            parameters,
            &*self,
        )?;

        self.commit(block)
    }
}

impl ChainHistory for InMemoryChain {
    /// Returns the block at `height`, if `block` is in this chain.
    fn ancestor(&self, block: &BlockRef, height: Height) -> Option<BlockRef> {
        if height > block.height || self.block(block.height) != Some(block) {
            return None;
        }

        self.block(height).copied()
    }
}

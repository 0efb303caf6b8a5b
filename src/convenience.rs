use crate::{BuildError, InequalityHandling, IterProducers, RoundRobin};

/// Constructs a new [`RoundRobin`] over plain iterators:
/// * Uses [`IterProducers`], so items are yielded as `Some(item)`, and as `None` for
///   exhausted producers under [`PassNull`](InequalityHandling::PassNull)
/// * Dispatches to every source, in order
///
/// # Errors
/// [`BuildError::NoProducers`] if `sources` is empty
///
/// # Examples
///
/// ```
/// use round_robin_merge::{round_robin, InequalityHandling};
///
/// let merged: Vec<_> = round_robin([vec![1, 2], vec![3, 4, 5]], InequalityHandling::Relocate)?
///     .map(|item| item.map(Option::unwrap))
///     .collect::<Result<_, _>>()?;
/// assert_eq!(merged, vec![1, 3, 2, 4, 5]);
/// # Ok::<(), Box<dyn std::error::Error>>(())
/// ```
pub fn round_robin<IT>(
    sources: IT, policy: InequalityHandling,
) -> Result<RoundRobin<IterProducers<IT::Item>>, BuildError>
where
    IT: IntoIterator,
    IT::Item: IntoIterator + Clone,
{
    RoundRobin::builder(IterProducers::new(sources))
        .inequality_handling(policy)
        .build()
}

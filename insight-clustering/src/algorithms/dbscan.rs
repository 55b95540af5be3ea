//! DBSCAN over a precomputed similarity matrix.
//!
//! Two points are neighbours when their similarity is at least
//! `min_similarity`. A point is core when it has at least `min_points`
//! neighbours (itself included). Clusters are the connected components of
//! core points; border points join the cluster they are most similar to.

/// DBSCAN parameters in similarity space.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct DbscanParams {
    pub min_similarity: f64,
    pub min_points: usize,
}

/// Clusters as sorted point indices, ordered by their first member.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct DbscanResult {
    pub clusters: Vec<Vec<usize>>,
    pub noise: Vec<usize>,
}

/// Tolerance under which two mean similarities count as a tie.
const TIE_EPSILON: f64 = 1e-9;

pub fn dbscan(similarity: &[Vec<f64>], params: DbscanParams) -> DbscanResult {
    let n = similarity.len();
    let min_points = params.min_points.max(1);
    if n < min_points {
        return DbscanResult {
            clusters: Vec::new(),
            noise: (0..n).collect(),
        };
    }

    let neighbours: Vec<Vec<usize>> = (0..n)
        .map(|i| {
            (0..n)
                .filter(|&j| i == j || similarity[i][j] >= params.min_similarity)
                .collect()
        })
        .collect();
    let is_core: Vec<bool> = neighbours.iter().map(|nb| nb.len() >= min_points).collect();

    // Connected components of core points.
    let mut label: Vec<Option<usize>> = vec![None; n];
    let mut cores_by_cluster: Vec<Vec<usize>> = Vec::new();
    for start in 0..n {
        if !is_core[start] || label[start].is_some() {
            continue;
        }
        let cluster_id = cores_by_cluster.len();
        let mut members = Vec::new();
        let mut stack = vec![start];
        label[start] = Some(cluster_id);
        while let Some(point) = stack.pop() {
            members.push(point);
            for &nb in &neighbours[point] {
                if is_core[nb] && label[nb].is_none() {
                    label[nb] = Some(cluster_id);
                    stack.push(nb);
                }
            }
        }
        members.sort_unstable();
        cores_by_cluster.push(members);
    }

    let cohesion: Vec<f64> = cores_by_cluster
        .iter()
        .map(|cores| super::similarity::mean_pairwise(similarity, cores))
        .collect();

    // Border points: reachable from at least one core point.
    for point in 0..n {
        if is_core[point] {
            continue;
        }
        let mut candidates: Vec<usize> = neighbours[point]
            .iter()
            .filter(|&&nb| is_core[nb])
            .filter_map(|&nb| label[nb])
            .collect();
        candidates.sort_unstable();
        candidates.dedup();

        label[point] = candidates.into_iter().max_by(|&a, &b| {
            let sim_a = mean_similarity_to(similarity, point, &cores_by_cluster[a]);
            let sim_b = mean_similarity_to(similarity, point, &cores_by_cluster[b]);
            if (sim_a - sim_b).abs() > TIE_EPSILON {
                return sim_a.total_cmp(&sim_b);
            }
            if (cohesion[a] - cohesion[b]).abs() > TIE_EPSILON {
                return cohesion[a].total_cmp(&cohesion[b]);
            }
            // Lower index wins the final tie.
            b.cmp(&a)
        });
    }

    let mut clusters: Vec<Vec<usize>> = vec![Vec::new(); cores_by_cluster.len()];
    let mut noise = Vec::new();
    for (point, assigned) in label.iter().enumerate() {
        match assigned {
            Some(c) => clusters[*c].push(point),
            None => noise.push(point),
        }
    }

    // A cluster that lost its border points to neighbours may fall below the minimum.
    let (kept, dissolved): (Vec<_>, Vec<_>) =
        clusters.into_iter().partition(|c| c.len() >= min_points);
    noise.extend(dissolved.into_iter().flatten());
    noise.sort_unstable();

    let mut clusters = kept;
    clusters.sort_by_key(|c| c[0]);
    DbscanResult { clusters, noise }
}

fn mean_similarity_to(similarity: &[Vec<f64>], point: usize, members: &[usize]) -> f64 {
    if members.is_empty() {
        return 0.0;
    }
    members.iter().map(|&m| similarity[point][m]).sum::<f64>() / members.len() as f64
}
